use super::types::{request, response};
use crate::{modules::provider::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_active_services(&ctx.db_conn.pool, payload.auth.user.id)
        .await
        .map(response::Success::Services)
        .map_err(|_| response::Error::FailedToFetchServices)
}
