pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        ProviderRejected,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProviderRejected => (
                    StatusCode::OK,
                    Json(json!({ "message": "Provider rejected" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        ProviderNotFound,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ProviderNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Provider not found" })),
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
