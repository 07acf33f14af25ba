use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};
use ulid::Ulid;

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PushToken {
    pub id: String,
    pub user_id: String,
    pub token: String,
    pub device_type: String,
    pub created_at: NaiveDateTime,
}

pub struct CreatePushTokenPayload {
    pub token: String,
    pub user_id: String,
    pub device_type: String,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

/// Registers a device token. Registering the same token twice keeps a single row.
pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreatePushTokenPayload,
) -> Result<PushToken, Error> {
    sqlx::query_as::<_, PushToken>(
        "
        INSERT INTO notification_tokens (
            id,
            user_id,
            token,
            device_type
        )
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, token) DO UPDATE SET device_type = EXCLUDED.device_type
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.user_id)
    .bind(payload.token)
    .bind(payload.device_type)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a push token: {}", err);
        Error::UnexpectedError
    })
}

pub async fn delete<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    token: String,
) -> Result<bool, Error> {
    sqlx::query("DELETE FROM notification_tokens WHERE user_id = $1 AND token = $2")
        .bind(user_id)
        .bind(token)
        .execute(e)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Error occurred while trying to delete a push token: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_many_by_user_id<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Vec<PushToken>, Error> {
    sqlx::query_as::<_, PushToken>("SELECT * FROM notification_tokens WHERE user_id = $1")
        .bind(&user_id)
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching push tokens of user {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
}
