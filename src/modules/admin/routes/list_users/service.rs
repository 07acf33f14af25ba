use super::types::response;
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    repository::find_many(&ctx.db_conn.pool)
        .await
        .map(response::Success::Users)
        .map_err(|_| response::Error::UnexpectedError)
}
