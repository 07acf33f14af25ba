use super::types::response;
use crate::{modules::admin::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    repository::find_service_stats(&ctx.db_conn.pool)
        .await
        .map(response::Success::Stats)
        .map_err(|_| response::Error::UnexpectedError)
}
