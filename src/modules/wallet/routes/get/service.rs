use super::types::{request, response};
use crate::{
    modules::wallet::{repository, service as wallet_service},
    types::Context,
};
use chrono::Utc;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let provider_id = payload.auth.user.id;

    let earnings = repository::find_earnings(&ctx.db_conn.pool, provider_id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchWallet)?;

    let withdrawals = repository::find_withdrawals(&ctx.db_conn.pool, provider_id)
        .await
        .map_err(|_| response::Error::FailedToFetchWallet)?;

    Ok(response::Success::Wallet(wallet_service::summarize(
        &earnings,
        &withdrawals,
        &ctx.payment.commission_rate,
        Utc::now().naive_utc(),
    )))
}
