pub mod request {
    pub struct Payload {
        pub category_id: i32,
    }
}

pub mod response {
    use crate::modules::catalog::repository::ServiceItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Items(Vec<ServiceItem>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Items(items) => (StatusCode::OK, Json(items)).into_response(),
            }
        }
    }

    pub enum Error {
        CategoryNotFound,
        FailedToFetchItems,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CategoryNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Category not found" })),
                )
                    .into_response(),
                Self::FailedToFetchItems => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch services" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
