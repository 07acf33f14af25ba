use super::types::{request, response};
use crate::{
    modules::{
        notification::service::{dispatch, Backend, Notification},
        order::repository::{self, JobStatus},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let job = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateJob)?
        .ok_or(response::Error::JobNotFound)?;

    if job.provider_id.as_deref() != Some(payload.auth.user.id.as_str()) {
        return Err(response::Error::NotJobProvider);
    }

    if job.status != JobStatus::Pending {
        return Err(response::Error::AlreadyAnswered);
    }

    let next = match payload.body.accepted {
        true => JobStatus::Assigned,
        false => JobStatus::Rejected,
    };

    let job = repository::transition(&ctx.db_conn.pool, job.id, JobStatus::Pending, next)
        .await
        .map_err(|_| response::Error::FailedToUpdateJob)?
        .ok_or(response::Error::AlreadyAnswered)?;

    tracing::info!(
        "Provider {} answered job {}: {}",
        payload.auth.user.id,
        job.id,
        job.status
    );

    let status = job.status;
    let client_id = job.client_id.clone();

    dispatch(
        ctx,
        Notification::job_status_changed(job, client_id),
        &[Backend::Push, Backend::Realtime],
    );

    Ok(response::Success::Answered { status })
}
