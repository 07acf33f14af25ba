use crate::modules::{order::repository::JobStatus, payment::repository::PAID};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use ulid::Ulid;

pub const PENDING: &str = "pending";

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

/// A paid payment of one of the provider's completed jobs, before commission.
#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Earning {
    pub payment_id: String,
    pub job_id: String,
    pub service_name: String,
    pub amount: BigDecimal,
    pub paid_at: NaiveDateTime,
}

pub async fn find_earnings<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
) -> Result<Vec<Earning>> {
    sqlx::query_as::<_, Earning>(
        "
        SELECT
            payments.id AS payment_id,
            payments.job_id,
            service_items.name AS service_name,
            payments.amount,
            payments.created_at AS paid_at
        FROM payments
        INNER JOIN jobs ON jobs.id = payments.job_id
        INNER JOIN service_items ON service_items.id = jobs.service_item_id
        WHERE jobs.provider_id = $1
            AND jobs.status = $2
            AND payments.status = $3
        ORDER BY payments.created_at DESC
        ",
    )
    .bind(&provider_id)
    .bind(i32::from(JobStatus::Completed))
    .bind(PAID)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching earnings of provider {}: {}",
            provider_id,
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: String,
    pub provider_id: String,
    pub amount: BigDecimal,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl Withdrawal {
    pub fn is_pending(&self) -> bool {
        self.status == PENDING
    }
}

pub async fn find_withdrawals<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
) -> Result<Vec<Withdrawal>> {
    sqlx::query_as::<_, Withdrawal>(
        "SELECT * FROM withdrawals WHERE provider_id = $1 ORDER BY created_at DESC",
    )
    .bind(&provider_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching withdrawals of provider {}: {}",
            provider_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn create_withdrawal<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
    amount: BigDecimal,
) -> Result<Withdrawal> {
    sqlx::query_as::<_, Withdrawal>(
        "
        INSERT INTO withdrawals (id, provider_id, amount, status)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(&provider_id)
    .bind(amount)
    .bind(PENDING)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating a withdrawal for provider {}: {}",
            provider_id,
            err
        );
        Error::UnexpectedError
    })
}

/// Serialises concurrent withdrawals of the same provider until the transaction ends.
pub async fn lock_provider<'e, E: PgExecutor<'e>>(e: E, provider_id: String) -> Result<()> {
    sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(&provider_id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while locking provider {}: {}", provider_id, err);
            Error::UnexpectedError
        })
}
