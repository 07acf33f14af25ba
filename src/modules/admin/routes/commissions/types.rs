pub mod request {
    use bigdecimal::BigDecimal;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Query {
        pub rate: Option<BigDecimal>,
    }

    pub struct Payload {
        pub query: Query,
    }
}

pub mod response {
    use crate::modules::admin::service::Commission;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Commissions(Vec<Commission>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Commissions(rows) => (StatusCode::OK, Json(rows)).into_response(),
            }
        }
    }

    pub enum Error {
        InvalidRate,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidRate => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Rate must be between 0 and 1" })),
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
