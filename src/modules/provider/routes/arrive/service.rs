use super::types::{request, response};
use crate::{
    modules::{
        notification::service::{dispatch, Backend, Notification},
        order::repository,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let job = repository::find_by_id(&ctx.db_conn.pool, payload.job_id)
        .await
        .map_err(|_| response::Error::FailedToFetchJob)?
        .ok_or(response::Error::JobNotFound)?;

    if job.provider_id.as_deref() != Some(payload.auth.user.id.as_str()) {
        return Err(response::Error::NotJobProvider);
    }

    tracing::info!("Provider {} arrived for job {}", payload.auth.user.id, job.id);

    dispatch(
        ctx,
        Notification::provider_arrived(job),
        &[Backend::Push, Backend::Realtime],
    );

    Ok(response::Success::ClientNotified)
}
