use super::types::{request, response};
use crate::{modules::catalog::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if !repository::category_exists(&ctx.db_conn.pool, payload.category_id)
        .await
        .map_err(|_| response::Error::FailedToFetchItems)?
    {
        return Err(response::Error::CategoryNotFound);
    }

    repository::find_items_by_category(&ctx.db_conn.pool, payload.category_id)
        .await
        .map(response::Success::Items)
        .map_err(|_| response::Error::FailedToFetchItems)
}
