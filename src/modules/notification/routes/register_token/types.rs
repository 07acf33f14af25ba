pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Body {
        pub token: String,
        pub device_type: Option<String>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        PushTokenRegistered,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::PushTokenRegistered => (
                    StatusCode::OK,
                    Json(json!({ "message": "Push token registered" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        MissingToken,
        FailedToRegisterPushToken,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MissingToken => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Token is required" })),
                )
                    .into_response(),
                Self::FailedToRegisterPushToken => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Push token registration failed" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
