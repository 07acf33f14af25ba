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
                    Json(
                        jobs.iter()
                            .map(|job| {
                                json!({
                                    "id": job.id,
                                    "service": job.service_name,
                                    "client": job.client_name,
                                    "provider": job.provider_name,
                                    "price": job.price,
                                    "status": job.status.label(),
                                    "statusCode": job.status,
                                    "date": job.created_at,
                                })
                            })
                            .collect::<Vec<_>>(),
                    ),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
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
