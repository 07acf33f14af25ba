pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub id: String,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::order::repository::{Job, JobListItem, JobMessage};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::{json, Value};

    pub struct JobDetail {
        pub viewer_id: String,
        pub job: Job,
        pub item: JobListItem,
        pub messages: Vec<JobMessage>,
    }

    impl JobDetail {
        pub fn to_json(&self) -> Value {
            let messages = self
                .messages
                .iter()
                .map(|message| {
                    let mut value = json!(message);
                    if let Value::Object(ref mut fields) = value {
                        fields.insert(
                            "isMe".to_string(),
                            Value::from(message.sender_id == self.viewer_id),
                        );
                    }
                    value
                })
                .collect::<Vec<_>>();

            let mut value = self.item.to_json();
            if let Value::Object(ref mut fields) = value {
                fields.insert("lat".to_string(), Value::from(self.job.lat));
                fields.insert("lng".to_string(), Value::from(self.job.lng));
                fields.insert("messages".to_string(), Value::from(messages));
            }
            value
        }
    }

    pub enum Success {
        Job(JobDetail),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Job(detail) => (StatusCode::OK, Json(detail.to_json())).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchJob,
        JobNotFound,
        NotAllowed,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchJob => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch order" })),
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
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
