pub mod request {
    use crate::modules::auth::middleware::ProviderAuth;

    pub struct Payload {
        pub auth: ProviderAuth,
    }
}

pub mod response {
    use crate::modules::order::repository::JobListItem;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Jobs(Vec<JobListItem>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Jobs(jobs) => (
                    StatusCode::OK,
                    Json(jobs.iter().map(JobListItem::to_json).collect::<Vec<_>>()),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchJobs,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchJobs => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch assigned jobs" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
