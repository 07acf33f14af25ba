use super::types::{request, response};
use crate::{modules::notification::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::push_token::delete(
        &ctx.db_conn.pool,
        payload.auth.user.id,
        payload.body.token.trim().to_string(),
    )
    .await
    .map_err(|_| response::Error::FailedToRemovePushToken)?;

    Ok(response::Success::PushTokenRemoved)
}
