use super::types::{request, response};
use crate::{modules::catalog::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if let Some(service_id) = payload.query.service_id {
        return repository::find_item_providers(&ctx.db_conn.pool, service_id)
            .await
            .map(response::Success::Providers)
            .map_err(|_| response::Error::FailedToSearch);
    }

    let term = payload.query.q.unwrap_or_default().trim().to_string();
    if term.is_empty() {
        return Ok(response::Success::Items(vec![]));
    }

    repository::search_items(&ctx.db_conn.pool, term)
        .await
        .map(response::Success::Items)
        .map_err(|_| response::Error::FailedToSearch)
}
