pub mod request {
    use serde::Deserialize;
    use serde_aux::prelude::deserialize_option_number_from_string;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Query {
        pub q: Option<String>,
        #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
        pub service_id: Option<i32>,
    }

    pub struct Payload {
        pub query: Query,
    }
}

pub mod response {
    use crate::modules::catalog::repository::{ItemProvider, ServiceItem};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Items(Vec<ServiceItem>),
        Providers(Vec<ItemProvider>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Items(items) => (StatusCode::OK, Json(items)).into_response(),
                Self::Providers(providers) => (StatusCode::OK, Json(providers)).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToSearch,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToSearch => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to search the catalog" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
