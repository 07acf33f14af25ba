use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{code, password},
        notification::service::{dispatch, Backend, Notification},
        provider,
        user::repository::{self, Role, Status},
    },
    types::Context,
};
use std::sync::Arc;
use validator::Validate;

const DEFAULT_ZONE: &str = "General";

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload.body.validate().map_err(|errors| {
        tracing::warn!("Failed to validate payload: {errors}");
        response::Error::FailedToValidate(errors)
    })?;

    let body = payload.body;
    let role = body.role.unwrap_or(Role::Client);
    if role == Role::Admin {
        return Err(response::Error::AdminRegistrationForbidden);
    }

    let email = body.email.trim().to_lowercase();
    let password_hash =
        password::hash(&body.password).map_err(|_| response::Error::UnexpectedError)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    if repository::find_by_email(&mut *tx, email.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .is_some()
    {
        return Err(response::Error::EmailAlreadyInUse);
    }

    let user = repository::create(
        &mut *tx,
        repository::CreateUserPayload {
            email,
            full_name: body.full_name.trim().to_string(),
            role,
            status: Status::initial_for(role),
            password_hash,
            email_confirmed: false,
            firebase_uid: None,
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::EmailTaken => response::Error::EmailAlreadyInUse,
        _ => response::Error::SignupFailed,
    })?;

    if role == Role::Provider {
        provider::repository::create_profile(
            &mut *tx,
            provider::repository::CreateProfilePayload {
                user_id: user.id.clone(),
                zones: body
                    .provider_category_code
                    .filter(|code| !code.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_ZONE.to_string()),
                cv_url: body.cv_url,
                photo_url: body.photo_url,
            },
        )
        .await
        .map_err(|_| response::Error::FailedToCreateProviderProfile)?;
    }

    let confirmation_code = code::issue(&mut tx, &user, code::EMAIL_CONFIRMATION)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!("Registered {} account {}", role, user.id);

    let user_id = user.id.clone();

    // the user can always ask for another code if this one never arrives
    dispatch(
        ctx,
        Notification::email_verification_requested(user, confirmation_code),
        &[Backend::Email],
    );

    Ok(response::Success::Registered { user_id })
}
