use super::types::response;
use crate::{
    modules::catalog::{repository, service as catalog_service},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    let categories = repository::find_categories(&ctx.db_conn.pool)
        .await
        .map_err(|_| response::Error::FailedToFetchCatalog)?;

    let items = repository::find_items(&ctx.db_conn.pool)
        .await
        .map_err(|_| response::Error::FailedToFetchCatalog)?;

    Ok(response::Success::Tree(catalog_service::build_tree(categories, items)))
}
