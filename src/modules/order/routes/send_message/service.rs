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
    let content = payload.body.content.trim().to_string();
    if content.is_empty() {
        return Err(response::Error::EmptyMessage);
    }

    let job = repository::find_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToSendMessage)?
        .ok_or(response::Error::JobNotFound)?;

    let sender_id = payload.auth.user.id;
    if !job.is_participant(&sender_id) {
        return Err(response::Error::NotAllowed);
    }

    let message = repository::create_message(
        &ctx.db_conn.pool,
        repository::CreateMessagePayload {
            job_id: job.id.clone(),
            sender_id: sender_id.clone(),
            content,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToSendMessage)?;

    if let Some(recipient_id) = job.counterpart_of(&sender_id) {
        dispatch(
            ctx,
            Notification::new_message(message.clone(), recipient_id),
            &[Backend::Push, Backend::Realtime],
        );
    }

    Ok(response::Success::MessageSent(message))
}
