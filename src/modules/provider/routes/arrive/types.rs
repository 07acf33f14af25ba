pub mod request {
    use crate::modules::auth::middleware::ProviderAuth;

    pub struct Payload {
        pub job_id: String,
        pub auth: ProviderAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        ClientNotified,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ClientNotified => (
                    StatusCode::OK,
                    Json(json!({ "message": "Client notified" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchJob,
        JobNotFound,
        NotJobProvider,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchJob => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch job" })),
                )
                    .into_response(),
                Self::JobNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Job not found" })),
                )
                    .into_response(),
                Self::NotJobProvider => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You are not the provider of this job" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
