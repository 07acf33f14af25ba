use super::types::{request, response};
use crate::{
    modules::admin::{repository, service as admin_service},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let rate = payload
        .query
        .rate
        .unwrap_or_else(|| ctx.payment.commission_rate.clone());

    if !admin_service::is_valid_rate(&rate) {
        return Err(response::Error::InvalidRate);
    }

    let jobs = repository::find_settled_jobs(&ctx.db_conn.pool)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    Ok(response::Success::Commissions(admin_service::commissions(
        jobs, &rate,
    )))
}
