pub mod request {
    use crate::modules::auth::middleware::ProviderAuth;
    use bigdecimal::BigDecimal;
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Body {
        pub amount: BigDecimal,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: ProviderAuth,
    }
}

pub mod response {
    use crate::modules::wallet::{repository::Withdrawal, service::MINIMUM_WITHDRAWAL};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        WithdrawalPlaced(Withdrawal),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::WithdrawalPlaced(withdrawal) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Withdrawal requested",
                        "withdrawal": withdrawal,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        BelowMinimum,
        InsufficientFunds,
        FailedToWithdraw,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::BelowMinimum => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": format!("Minimum withdrawal is {} MAD", MINIMUM_WITHDRAWAL)
                    })),
                )
                    .into_response(),
                Self::InsufficientFunds => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Insufficient balance" })),
                )
                    .into_response(),
                Self::FailedToWithdraw => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to request withdrawal" })),
                )
                    .into_response(),
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
