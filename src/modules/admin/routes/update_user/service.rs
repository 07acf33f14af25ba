use super::types::{request, response};
use crate::{
    modules::user::repository::{self, UpdateUserPayload},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = repository::update_by_id(
        &ctx.db_conn.pool,
        payload.id.clone(),
        UpdateUserPayload {
            role: payload.body.role,
            status: payload.body.status,
        },
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?
    .ok_or(response::Error::UserNotFound)?;

    tracing::info!(
        "User {} updated to role {} and status {}",
        user.id,
        user.role,
        user.status
    );

    Ok(response::Success::UserUpdated(user))
}
