pub mod request {
    use crate::modules::auth::middleware::Auth;

    pub struct Payload {
        pub auth: Auth,
    }
}

pub mod response {
    use crate::modules::auth::middleware::Auth;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        User(Auth),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::User(auth) => (
                    StatusCode::OK,
                    Json(json!({
                        "id": auth.user.id,
                        "email": auth.user.email,
                        "fullName": auth.user.full_name,
                        "role": auth.role,
                        "status": auth.user.status,
                        "emailConfirmed": auth.user.email_confirmed,
                        "twoFactorEnabled": auth.user.two_factor_enabled,
                        "rating": auth.user.rating,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {}

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {}
        }
    }

    pub type Response = Result<Success, Error>;
}
