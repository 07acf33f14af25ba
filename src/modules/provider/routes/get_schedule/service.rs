use super::types::{request, response};
use crate::{modules::provider::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_or_create_profile(&ctx.db_conn.pool, payload.auth.user.id)
        .await
        .map(|profile| response::Success::Schedule(profile.schedule))
        .map_err(|_| response::Error::FailedToFetchSchedule)
}
