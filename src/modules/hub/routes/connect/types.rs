pub mod request {
    use axum::extract::ws::WebSocketUpgrade;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Query {
        pub access_token: Option<String>,
    }

    pub struct Payload {
        pub query: Query,
        pub ws: WebSocketUpgrade,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Upgraded(axum::response::Response),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Upgraded(response) => response,
            }
        }
    }

    pub enum Error {
        InvalidSession,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidSession => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid session token" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
