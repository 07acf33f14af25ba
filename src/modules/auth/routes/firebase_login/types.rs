pub mod request {
    use crate::modules::user::repository::Role;
    use serde::Deserialize;

    /// Only read when the Firebase account has no local user yet.
    #[derive(Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct Body {
        pub full_name: Option<String>,
        pub role: Option<Role>,
        pub provider_category_code: Option<String>,
        pub cv_url: Option<String>,
        pub photo_url: Option<String>,
    }

    pub struct Payload {
        pub id_token: Option<String>,
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
        MissingToken,
        InvalidToken,
        FirebaseDisabled,
        AdminRegistrationForbidden,
        FailedToFetchUser,
        EmailAlreadyInUse,
        SignupFailed,
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
                Self::MissingToken => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Missing Firebase ID token" })),
                )
                    .into_response(),
                Self::InvalidToken => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid Firebase ID token" })),
                )
                    .into_response(),
                Self::FirebaseDisabled => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({ "error": "Firebase login is not configured" })),
                )
                    .into_response(),
                Self::AdminRegistrationForbidden => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Admin accounts cannot be self-registered" })),
                )
                    .into_response(),
                Self::FailedToFetchUser => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch user" })),
                )
                    .into_response(),
                Self::EmailAlreadyInUse => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Email already in use" })),
                )
                    .into_response(),
                Self::SignupFailed => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sign up failed!" })),
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
