pub mod request {
    use crate::modules::auth::middleware::ProviderAuth;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Body {
        pub is_available: bool,
        pub lat: Option<f64>,
        pub lng: Option<f64>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: ProviderAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        AvailabilityUpdated { is_available: bool },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AvailabilityUpdated { is_available } => (
                    StatusCode::OK,
                    Json(json!({ "isAvailable": is_available })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToUpdateAvailability,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToUpdateAvailability => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update availability" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
