pub mod request {
    use crate::modules::auth::middleware::ProviderAuth;

    pub struct Payload {
        pub auth: ProviderAuth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::{json, Value};

    pub enum Success {
        Schedule(Value),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Schedule(schedule) => (StatusCode::OK, Json(schedule)).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchSchedule,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchSchedule => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch schedule" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
