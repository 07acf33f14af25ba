pub mod request {
    pub struct Payload {
        pub item_id: i32,
    }
}

pub mod response {
    use crate::modules::catalog::repository::{ItemProvider, ServiceItem};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::Serialize;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ServiceDetail {
        pub service_id: i32,
        #[serde(flatten)]
        pub item: ServiceItem,
        pub category_name: String,
        pub providers: Vec<ItemProvider>,
    }

    pub enum Success {
        Service(ServiceDetail),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Service(detail) => (StatusCode::OK, Json(detail)).into_response(),
            }
        }
    }

    pub enum Error {
        ServiceNotFound,
        FailedToFetchService,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ServiceNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Service not found" })),
                )
                    .into_response(),
                Self::FailedToFetchService => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch service" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
