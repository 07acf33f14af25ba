use super::types::response;
use crate::{modules::payment::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    repository::find_many(&ctx.db_conn.pool)
        .await
        .map(response::Success::Payments)
        .map_err(|_| response::Error::UnexpectedError)
}
