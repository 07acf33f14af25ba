pub mod request {
    use crate::modules::auth::middleware::ProviderAuth;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub accepted: bool,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
        pub auth: ProviderAuth,
    }
}

pub mod response {
    use crate::modules::order::repository::JobStatus;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Answered { status: JobStatus },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Answered { status } => (
                    StatusCode::OK,
                    Json(json!({
                        "message": match status {
                            JobStatus::Assigned => "Order accepted",
                            _ => "Order declined",
                        },
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
        NotJobProvider,
        AlreadyAnswered,
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
                Self::NotJobProvider => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "You are not the provider of this order" })),
                )
                    .into_response(),
                Self::AlreadyAnswered => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Only pending orders can be answered" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
