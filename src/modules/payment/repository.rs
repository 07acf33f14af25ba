use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

pub const PAID: &str = "paid";

#[derive(Debug)]
pub enum Error {
    AlreadyPaid,
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum PaymentMethod {
    Stripe,
    Paypal,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "stripe",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stripe" => Ok(PaymentMethod::Stripe),
            "paypal" => Ok(PaymentMethod::Paypal),
            "cash" => Ok(PaymentMethod::Cash),
            _ => Err(format!("'{}' is not a valid payment method", s)),
        }
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub job_id: String,
    pub payer_id: String,
    #[sqlx(try_from = "String")]
    pub method: PaymentMethod,
    pub transaction_id: String,
    pub amount: BigDecimal,
    pub status: String,
    pub created_at: NaiveDateTime,
}

pub struct CreatePaymentPayload {
    pub job_id: String,
    pub payer_id: String,
    pub method: PaymentMethod,
    pub transaction_id: String,
    pub amount: BigDecimal,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreatePaymentPayload) -> Result<Payment> {
    sqlx::query_as::<_, Payment>(
        "
        INSERT INTO payments (id, job_id, payer_id, method, transaction_id, amount, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.job_id)
    .bind(payload.payer_id)
    .bind(payload.method.as_str())
    .bind(payload.transaction_id)
    .bind(payload.amount)
    .bind(PAID)
    .fetch_one(e)
    .await
    .map_err(|err| {
        if err
            .as_database_error()
            .is_some_and(|e| e.is_unique_violation())
        {
            return Error::AlreadyPaid;
        }
        tracing::error!("Error occurred while trying to record a payment: {}", err);
        Error::UnexpectedError
    })
}

/// A payment as listed on the admin dashboard.
#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListItem {
    pub id: String,
    pub job_id: String,
    pub service: String,
    pub client: String,
    pub provider: Option<String>,
    pub amount: BigDecimal,
    pub method: String,
    pub status: String,
    pub date: NaiveDateTime,
}

pub async fn find_many<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<PaymentListItem>> {
    sqlx::query_as::<_, PaymentListItem>(
        "
        SELECT
            payments.id,
            payments.job_id,
            service_items.name AS service,
            clients.full_name AS client,
            providers.full_name AS provider,
            payments.amount,
            payments.method,
            payments.status,
            payments.created_at AS date
        FROM payments
        INNER JOIN jobs ON jobs.id = payments.job_id
        INNER JOIN service_items ON service_items.id = jobs.service_item_id
        INNER JOIN users AS clients ON clients.id = jobs.client_id
        LEFT JOIN users AS providers ON providers.id = jobs.provider_id
        ORDER BY payments.created_at DESC
        ",
    )
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching payments: {}", err);
        Error::UnexpectedError
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_methods_case_insensitively() {
        assert_eq!("Stripe".parse::<PaymentMethod>(), Ok(PaymentMethod::Stripe));
        assert_eq!("cash".parse::<PaymentMethod>(), Ok(PaymentMethod::Cash));
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn methods_use_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_value(PaymentMethod::Paypal).unwrap(), json!("paypal"));
        assert_eq!(
            serde_json::from_value::<PaymentMethod>(json!("Cash")).unwrap(),
            PaymentMethod::Cash
        );
    }
}
