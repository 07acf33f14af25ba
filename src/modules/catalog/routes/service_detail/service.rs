use super::types::{request, response};
use crate::{modules::catalog::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let item = repository::find_item_by_id(&ctx.db_conn.pool, payload.item_id)
        .await
        .map_err(|_| response::Error::FailedToFetchService)?
        .ok_or(response::Error::ServiceNotFound)?;

    let category_name = repository::find_category_name(&ctx.db_conn.pool, item.category_id)
        .await
        .map_err(|_| response::Error::FailedToFetchService)?
        .unwrap_or_default();

    let providers = repository::find_item_providers(&ctx.db_conn.pool, item.id)
        .await
        .map_err(|_| response::Error::FailedToFetchService)?;

    Ok(response::Success::Service(response::ServiceDetail {
        service_id: item.id,
        category_name,
        item,
        providers,
    }))
}
