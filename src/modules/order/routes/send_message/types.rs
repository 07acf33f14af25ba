pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub content: String,
    }

    pub struct Payload {
        pub id: String,
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::order::repository::JobMessage;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::{json, Value};

    pub enum Success {
        MessageSent(JobMessage),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::MessageSent(message) => {
                    let mut value = json!(message);
                    if let Value::Object(ref mut fields) = value {
                        fields.insert("isMe".to_string(), Value::from(true));
                    }
                    (StatusCode::CREATED, Json(value)).into_response()
                }
            }
        }
    }

    pub enum Error {
        EmptyMessage,
        JobNotFound,
        NotAllowed,
        FailedToSendMessage,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::EmptyMessage => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Message cannot be empty" })),
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
                Self::FailedToSendMessage => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to send message" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
