pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Toggled { enabled: bool },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Toggled { enabled } => (
                    StatusCode::OK,
                    Json(json!({
                        "enabled": enabled,
                        "message": match enabled {
                            true => "Two-factor authentication enabled",
                            false => "Two-factor authentication disabled",
                        },
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToToggle,
        UserNotFound,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToToggle => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update two-factor authentication" })),
                )
                    .into_response(),
                Self::UserNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "User not found" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
