use super::types::response;
use crate::{
    modules::{
        notification::service::{dispatch, Backend, Notification},
        provider,
        user::repository::{self as user_repository, Role, Status, UpdateUserPayload},
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, id: String) -> response::Response {
    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    let user = user_repository::find_by_id(&mut *tx, id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?
        .filter(|user| user.role == Role::Provider)
        .ok_or(response::Error::ProviderNotFound)?;

    provider::repository::reset_onboarding(&mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    provider::repository::clear_services(&mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let user = user_repository::update_by_id(
        &mut *tx,
        user.id,
        UpdateUserPayload {
            role: None,
            status: Some(Status::Pending),
        },
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?
    .ok_or(response::Error::ProviderNotFound)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!("Provider {} rejected, onboarding reset", user.id);

    dispatch(
        ctx,
        Notification::provider_rejected(user),
        &[Backend::Push, Backend::Email],
    );

    Ok(response::Success::ProviderRejected)
}
