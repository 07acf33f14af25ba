use super::types::response;
use crate::{
    modules::admin::{
        repository,
        service::{merge_activity, ACTIVITY_LIMIT},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    let limit = ACTIVITY_LIMIT as i64;

    let (registrations, orders, payments) = tokio::try_join!(
        repository::find_recent_registrations(&ctx.db_conn.pool, limit),
        repository::find_recent_orders(&ctx.db_conn.pool, limit),
        repository::find_recent_payments(&ctx.db_conn.pool, limit),
    )
    .map_err(|_| response::Error::UnexpectedError)?;

    Ok(response::Success::Activity(merge_activity(vec![
        registrations,
        orders,
        payments,
    ])))
}
