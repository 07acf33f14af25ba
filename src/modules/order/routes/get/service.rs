use super::types::{request, response};
use crate::{
    modules::order::{repository, service::Actor},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let job = repository::find_by_id(&ctx.db_conn.pool, payload.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchJob)?
        .ok_or(response::Error::JobNotFound)?;

    if Actor::of(&payload.auth.user, &job).is_none() {
        return Err(response::Error::NotAllowed);
    }

    let item = repository::find_list_item_by_id(&ctx.db_conn.pool, payload.id)
        .await
        .map_err(|_| response::Error::FailedToFetchJob)?
        .ok_or(response::Error::JobNotFound)?;

    let messages = repository::find_messages(&ctx.db_conn.pool, job.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchJob)?;

    Ok(response::Success::Job(response::JobDetail {
        viewer_id: payload.auth.user.id,
        job,
        item,
        messages,
    }))
}
