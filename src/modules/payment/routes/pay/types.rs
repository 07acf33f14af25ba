pub mod request {
    use crate::modules::{auth::middleware::Auth, payment::repository::PaymentMethod};
    use bigdecimal::BigDecimal;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Order {
        pub job_id: String,
        pub method: PaymentMethod,
        pub transaction_id: Option<String>,
        pub price: Option<BigDecimal>,
    }

    /// The mobile client retries with the order wrapped in `dto`.
    #[derive(Deserialize, Debug)]
    #[serde(untagged)]
    pub enum Body {
        Wrapped { dto: Order },
        Plain(Order),
    }

    impl Body {
        pub fn into_order(self) -> Order {
            match self {
                Body::Wrapped { dto } => dto,
                Body::Plain(order) => order,
            }
        }
    }

    pub struct Payload {
        pub order: Order,
        pub auth: Auth,
    }

    #[cfg(test)]
    mod test {
        use super::*;
        use serde_json::json;

        #[test]
        fn accepts_plain_and_wrapped_orders() {
            let plain = serde_json::from_value::<Body>(json!({
                "jobId": "job-1",
                "method": "cash",
            }))
            .unwrap()
            .into_order();
            assert_eq!(plain.job_id, "job-1");
            assert_eq!(plain.method, PaymentMethod::Cash);
            assert!(plain.transaction_id.is_none());

            let wrapped = serde_json::from_value::<Body>(json!({
                "dto": { "jobId": "job-2", "method": "stripe", "transactionId": "pi_123" }
            }))
            .unwrap()
            .into_order();
            assert_eq!(wrapped.job_id, "job-2");
            assert_eq!(wrapped.transaction_id.as_deref(), Some("pi_123"));
        }

        #[test]
        fn rejects_unknown_methods() {
            assert!(serde_json::from_value::<Body>(json!({
                "jobId": "job-1",
                "method": "bitcoin",
            }))
            .is_err());
        }
    }
}

pub mod response {
    use crate::modules::{order::repository::JobStatus, payment::repository::Payment};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Paid(Payment),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Paid(payment) => (
                    StatusCode::OK,
                    Json(json!({
                        "message": "Payment recorded",
                        "paymentId": payment.id,
                        "jobId": payment.job_id,
                        "amount": payment.amount,
                        "transactionId": payment.transaction_id,
                        "statusCode": JobStatus::Confirmed,
                        "status": JobStatus::Confirmed.label(),
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        JobNotFound,
        NotJobClient,
        NotPayable(JobStatus),
        AlreadyPaid,
        StatusChanged,
        FailedToPay,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::JobNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Order not found" })),
                )
                    .into_response(),
                Self::NotJobClient => (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Only the client of this order can pay it" })),
                )
                    .into_response(),
                Self::NotPayable(status) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": format!("Order cannot be paid while {}", status)
                    })),
                )
                    .into_response(),
                Self::AlreadyPaid => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Order is already paid" })),
                )
                    .into_response(),
                Self::StatusChanged => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "Order was updated meanwhile, please retry" })),
                )
                    .into_response(),
                Self::FailedToPay => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Payment failed" })),
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
