use super::types::{request, response};
use crate::{
    modules::{
        notification::service::{dispatch, Backend, Notification},
        order::{
            repository,
            service::{can_transition, status_change_recipients, Actor},
        },
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let job = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToUpdateJob)?
        .ok_or(response::Error::JobNotFound)?;

    let actor = Actor::of(&payload.auth.user, &job).ok_or(response::Error::NotAllowed)?;
    let next = payload.body.status;

    if !can_transition(actor, job.status, next) {
        return Err(response::Error::InvalidTransition {
            from: job.status,
            to: next,
        });
    }

    let from = job.status;
    let job = repository::transition(&ctx.db_conn.pool, job.id, from, next)
        .await
        .map_err(|_| response::Error::FailedToUpdateJob)?
        .ok_or(response::Error::InvalidTransition { from, to: next })?;

    tracing::info!(
        "Job {} moved from {} to {} by {:?} {}",
        job.id,
        from,
        next,
        actor,
        payload.auth.user.id
    );

    for recipient_id in status_change_recipients(actor, &job) {
        dispatch(
            ctx.clone(),
            Notification::job_status_changed(job.clone(), recipient_id),
            &[Backend::Push, Backend::Realtime],
        );
    }

    Ok(response::Success::StatusUpdated { status: job.status })
}
