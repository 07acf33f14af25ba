use super::types::{request, response};
use crate::{modules::notification::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let token = payload.body.token.trim().to_string();
    if token.is_empty() {
        return Err(response::Error::MissingToken);
    }

    repository::push_token::create(
        &ctx.db_conn.pool,
        repository::push_token::CreatePushTokenPayload {
            token,
            user_id: payload.auth.user.id,
            device_type: payload
                .body
                .device_type
                .unwrap_or_else(|| "mobile".to_string()),
        },
    )
    .await
    .map(|_| response::Success::PushTokenRegistered)
    .map_err(|_| response::Error::FailedToRegisterPushToken)
}
