use super::types::{request, response};
use crate::{
    modules::{catalog, provider::repository},
    types::Context,
};
use bigdecimal::{BigDecimal, Zero};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if payload.body.price <= BigDecimal::zero() {
        return Err(response::Error::InvalidPrice);
    }

    catalog::repository::find_item_by_id(&ctx.db_conn.pool, payload.body.service_item_id)
        .await
        .map_err(|_| response::Error::FailedToSaveService)?
        .ok_or(response::Error::ServiceNotFound)?;

    let user_id = payload.auth.user.id;

    repository::find_or_create_profile(&ctx.db_conn.pool, user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToSaveService)?;

    repository::upsert_service(
        &ctx.db_conn.pool,
        user_id,
        repository::UpsertServicePayload {
            service_item_id: payload.body.service_item_id,
            price: payload.body.price,
            is_active: payload.body.is_active,
        },
    )
    .await
    .map_err(|_| response::Error::FailedToSaveService)?;

    Ok(response::Success::ServiceSaved)
}
