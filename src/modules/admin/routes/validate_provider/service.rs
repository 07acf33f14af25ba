use super::types::response;
use crate::{
    modules::{
        notification::service::{dispatch, Backend, Notification},
        user::repository::{self, Role, Status, UpdateUserPayload},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, id: String) -> response::Response {
    let user = repository::find_by_id(&ctx.db_conn.pool, id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .filter(|user| user.role == Role::Provider)
        .ok_or(response::Error::ProviderNotFound)?;

    let user = repository::update_by_id(
        &ctx.db_conn.pool,
        user.id,
        UpdateUserPayload {
            role: None,
            status: Some(Status::Active),
        },
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?
    .ok_or(response::Error::ProviderNotFound)?;

    tracing::info!("Provider {} validated", user.id);

    dispatch(
        ctx,
        Notification::provider_validated(user),
        &[Backend::Push, Backend::Email],
    );

    Ok(response::Success::ProviderValidated)
}
