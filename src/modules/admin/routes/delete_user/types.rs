pub mod request {
    use crate::modules::auth::middleware::AdminAuth;

    pub struct Payload {
        pub id: String,
        pub auth: AdminAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        UserDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::UserDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "User deleted" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        CannotDeleteSelf,
        UserNotFound,
        HasHistory,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CannotDeleteSelf => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "You cannot delete your own account" })),
                )
                    .into_response(),
                Self::UserNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "User not found" })),
                )
                    .into_response(),
                Self::HasHistory => (
                    StatusCode::CONFLICT,
                    Json(json!({
                        "error": "User has orders or payments, ban the account instead"
                    })),
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
