pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub email: String,
        pub code: String,
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        EmailVerified,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::EmailVerified => (
                    StatusCode::OK,
                    Json(json!({ "message": "Email verified successfully" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchUser,
        UserNotFound,
        ExpiredCode,
        InvalidCode,
        TooManyAttempts,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::UserNotFound => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid email or code" })),
                )
                    .into_response(),
                Self::ExpiredCode => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Verification code expired" })),
                )
                    .into_response(),
                Self::InvalidCode => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid verification code" })),
                )
                    .into_response(),
                Self::TooManyAttempts => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Too many attempts, request a new code" })),
                )
                    .into_response(),
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sorry an error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
