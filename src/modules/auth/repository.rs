use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use ulid::Ulid;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Clone, Debug, FromRow)]
pub struct AuthCode {
    pub id: String,
    pub user_id: String,
    pub purpose: String,
    pub hash: String,
    pub expires_at: NaiveDateTime,
    pub consumed_at: Option<NaiveDateTime>,
    pub failed_attempts: i32,
    pub created_at: NaiveDateTime,
}

pub struct CreateAuthCodePayload {
    pub user_id: String,
    pub purpose: String,
    pub hash: String,
    pub expires_at: NaiveDateTime,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateAuthCodePayload) -> Result<AuthCode> {
    sqlx::query_as::<_, AuthCode>(
        "
        INSERT INTO auth_codes (
            id,
            user_id,
            purpose,
            hash,
            expires_at
        )
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_id)
    .bind(payload.purpose)
    .bind(payload.hash)
    .bind(payload.expires_at)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create an auth code: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_latest<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    purpose: String,
) -> Result<Option<AuthCode>> {
    sqlx::query_as::<_, AuthCode>(
        "
        SELECT * FROM auth_codes
        WHERE user_id = $1 AND purpose = $2
        ORDER BY created_at DESC
        LIMIT 1
        FOR UPDATE
        ",
    )
    .bind(user_id)
    .bind(purpose)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch an auth code: {}", err);
        Error::UnexpectedError
    })
}

pub async fn consume<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query("UPDATE auth_codes SET consumed_at = NOW() WHERE id = $1")
        .bind(&id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while consuming auth code {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn record_failure<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query("UPDATE auth_codes SET failed_attempts = failed_attempts + 1 WHERE id = $1")
        .bind(&id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while counting a failed attempt on code {}: {}", id, err);
            Error::UnexpectedError
        })
}
