pub mod request {
    use crate::modules::auth::middleware::Auth;
    use bigdecimal::BigDecimal;
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use serde_aux::prelude::deserialize_number_from_string;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Body {
        #[serde(deserialize_with = "deserialize_number_from_string")]
        pub service_id: i32,
        pub provider_id: Option<String>,
        pub price: BigDecimal,
        pub date: Option<DateTime<Utc>>,
        pub address: String,
        pub lat: f64,
        pub lng: f64,
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
        JobCreated { job_id: String },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::JobCreated { job_id } => (
                    StatusCode::CREATED,
                    Json(json!({
                        "id": job_id,
                        "jobId": job_id,
                        "message": "Order created",
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        OnlyClientsCanOrder,
        InvalidPrice,
        ServiceNotFound,
        ProviderUnavailable,
        FailedToCreateJob,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::OnlyClientsCanOrder => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only clients can place orders" })),
                )
                    .into_response(),
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
                Self::ProviderUnavailable => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "This provider does not offer this service" })),
                )
                    .into_response(),
                Self::FailedToCreateJob => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create order" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
