use super::types::{request, response};
use crate::{modules::provider::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id;

    repository::find_or_create_profile(&ctx.db_conn.pool, user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToUpdateAvailability)?;

    // both coordinates or none
    let position = payload.body.lat.zip(payload.body.lng);

    let profile = repository::update_availability(
        &ctx.db_conn.pool,
        user_id,
        payload.body.is_available,
        position,
    )
    .await
    .map_err(|_| response::Error::FailedToUpdateAvailability)?;

    Ok(response::Success::AvailabilityUpdated {
        is_available: profile.is_available,
    })
}
