use super::types::{request, response};
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::toggle_two_factor(&ctx.db_conn.pool, payload.auth.user.id)
        .await
        .map_err(|_| response::Error::FailedToToggle)?
        .map(|enabled| response::Success::Toggled { enabled })
        .ok_or(response::Error::UserNotFound)
}
