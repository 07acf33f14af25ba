pub mod request {
    use crate::modules::{auth::middleware::Auth, order::repository::JobStatus};
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub status: JobStatus,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::order::repository::JobStatus;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        StatusUpdated { status: JobStatus },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::StatusUpdated { status } => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Order status updated",
                        "statusCode": status,
                        "status": status.label(),
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToUpdateJob,
        JobNotFound,
        NotAllowed,
        InvalidTransition { from: JobStatus, to: JobStatus },
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToUpdateJob => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update order" })),
                )
                    .into_response(),
                Self::JobNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::NotAllowed => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You are not part of this order" })),
                )
                    .into_response(),
                Self::InvalidTransition { from, to } => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": format!("Cannot move an order from {} to {}", from, to)
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
