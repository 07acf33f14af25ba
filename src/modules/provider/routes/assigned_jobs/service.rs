use super::types::{request, response};
use crate::{
    modules::order::repository::{self, JobStatus},
    types::Context,
};
use std::sync::Arc;

const ACTIVE_STATUSES: [JobStatus; 4] = [
    JobStatus::Pending,
    JobStatus::Assigned,
    JobStatus::Confirmed,
    JobStatus::InProgress,
];

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    repository::find_many_by_provider(&ctx.db_conn.pool, payload.auth.user.id, &ACTIVE_STATUSES)
        .await
        .map(response::Success::Jobs)
        .map_err(|_| response::Error::FailedToFetchJobs)
}
