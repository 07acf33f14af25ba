pub mod request {
    use crate::modules::auth::middleware::ProviderAuth;
    use serde_json::Value;

    pub struct Payload {
        pub schedule: Value,
        pub auth: ProviderAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        ScheduleUpdated,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ScheduleUpdated => (
                    StatusCode::OK,
                    Json(json!({ "message": "Schedule updated" })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        FailedToUpdateSchedule,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToUpdateSchedule => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update schedule" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
