use super::types::response;
use crate::{
    modules::admin::{repository, service::attach_services},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    let providers = repository::find_pending_providers(&ctx.db_conn.pool)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let services = repository::find_selected_services(
        &ctx.db_conn.pool,
        providers.iter().map(|p| p.user_id.clone()).collect(),
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?;

    Ok(response::Success::PendingProviders(attach_services(
        providers, services,
    )))
}
