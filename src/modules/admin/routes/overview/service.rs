use super::types::response;
use crate::{
    modules::admin::{repository, service::platform_fee},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>) -> response::Response {
    let totals = repository::find_totals(&ctx.db_conn.pool)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let platform_revenue = platform_fee(&totals.revenue, &ctx.payment.commission_rate);

    Ok(response::Success::Overview {
        totals,
        platform_revenue,
    })
}
