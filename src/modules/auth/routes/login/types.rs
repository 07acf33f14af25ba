pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub email: String,
        pub password: String,
    }

    pub struct Payload {
        pub body: Body,
    }
}

pub mod response {
    use crate::modules::auth::service::session::{self, Session};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Session(Session),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Session(session) => (
                    StatusCode::OK,
                    Json(json!({
                        "token": session.token,
                        "role": session.role,
                        "fullName": session.full_name,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchUser,
        InvalidCredentials,
        UseFirebaseLogin,
        EmailNotVerified,
        AccountBanned,
        AccountPending,
        UnexpectedError,
    }

    impl From<session::Error> for Error {
        fn from(err: session::Error) -> Self {
            match err {
                session::Error::EmailNotVerified => Self::EmailNotVerified,
                session::Error::Banned => Self::AccountBanned,
                session::Error::AccountPending => Self::AccountPending,
                session::Error::UnexpectedError => Self::UnexpectedError,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::InvalidCredentials => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid email or password" })),
                )
                    .into_response(),
                Self::UseFirebaseLogin => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "UseFirebaseLogin" })),
                )
                    .into_response(),
                Self::EmailNotVerified => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "EmailNotVerified" })),
                )
                    .into_response(),
                Self::AccountBanned => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Account banned" })),
                )
                    .into_response(),
                Self::AccountPending => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "AccountPending" })),
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
