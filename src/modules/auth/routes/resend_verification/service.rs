use super::types::{request, response};
use crate::{
    modules::{
        auth::service::code,
        notification::service::{dispatch, Backend, Notification},
        user::repository,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    let user = match repository::find_by_email(&mut *tx, payload.body.email.trim().to_lowercase())
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
    {
        Some(user) if !user.email_confirmed => user,
        // same answer for unknown and confirmed accounts
        _ => return Ok(response::Success::CodeSent),
    };

    let confirmation_code = code::issue(&mut tx, &user, code::EMAIL_CONFIRMATION)
        .await
        .map_err(|err| match err {
            code::IssueError::TooSoon => response::Error::TooSoon,
            code::IssueError::NotSent => response::Error::UnexpectedError,
        })?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    dispatch(
        ctx,
        Notification::email_verification_requested(user, confirmation_code),
        &[Backend::Email],
    );

    Ok(response::Success::CodeSent)
}
