use super::types::{request, response};
use crate::{modules::provider::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id;

    repository::find_or_create_profile(&ctx.db_conn.pool, user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToUpdateSchedule)?;

    repository::update_schedule(&ctx.db_conn.pool, user_id, payload.schedule)
        .await
        .map_err(|_| response::Error::FailedToUpdateSchedule)?;

    Ok(response::Success::ScheduleUpdated)
}
