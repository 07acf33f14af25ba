pub mod request {
    use crate::modules::auth::middleware::ProviderAuth;
    use bigdecimal::BigDecimal;
    use serde::Deserialize;
    use serde_aux::prelude::deserialize_number_from_string;

    fn active_by_default() -> bool {
        true
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Body {
        #[serde(deserialize_with = "deserialize_number_from_string")]
        pub service_item_id: i32,
        pub price: BigDecimal,
        #[serde(default = "active_by_default")]
        pub is_active: bool,
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
        ServiceSaved,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ServiceSaved => (
                    StatusCode::OK,
                    Json(json!({ "message": "Service saved" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        InvalidPrice,
        ServiceNotFound,
        FailedToSaveService,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidPrice => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Price must be positive" })),
                )
                    .into_response(),
                Self::ServiceNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Service not found" })),
                )
                    .into_response(),
                Self::FailedToSaveService => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to save service" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
