use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{firebase, session},
        provider,
        user::repository::{self, Role, Status, User, FIREBASE_PASSWORD_SENTINEL},
    },
    types::Context,
};
use std::sync::Arc;

const DEFAULT_ZONE: &str = "General";

async fn create_user(
    ctx: &Context,
    claims: &firebase::IdTokenClaims,
    email: String,
    body: request::Body,
) -> Result<User, response::Error> {
    let role = body.role.unwrap_or(Role::Client);
    if role == Role::Admin {
        return Err(response::Error::AdminRegistrationForbidden);
    }

    let full_name = body
        .full_name
        .or_else(|| claims.name.clone())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    let user = repository::create(
        &mut *tx,
        repository::CreateUserPayload {
            email,
            full_name,
            role,
            status: Status::initial_for(role),
            password_hash: FIREBASE_PASSWORD_SENTINEL.to_string(),
            email_confirmed: true,
            firebase_uid: Some(claims.sub.clone()),
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
        .map_err(|_| response::Error::SignupFailed)?;
    }

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!("Created {} account {} from Firebase", role, user.id);

    Ok(user)
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let id_token = payload.id_token.ok_or(response::Error::MissingToken)?;
    let firebase_ctx = ctx
        .firebase
        .as_ref()
        .ok_or(response::Error::FirebaseDisabled)?;

    let claims = firebase::verify_id_token(firebase_ctx, &id_token)
        .await
        .map_err(|err| match err {
            firebase::Error::InvalidToken => response::Error::InvalidToken,
            firebase::Error::KeysUnavailable => response::Error::UnexpectedError,
        })?;

    let email = claims
        .email
        .as_deref()
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .ok_or(response::Error::InvalidToken)?;

    let existing = repository::find_by_email(&ctx.db_conn.pool, email.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?;

    let user = match existing {
        Some(user) if user.firebase_uid.is_none() => {
            repository::link_firebase_uid(&ctx.db_conn.pool, user.id, claims.sub.clone())
                .await
                .map_err(|_| response::Error::UnexpectedError)?
        }
        Some(user) => user,
        None => create_user(&ctx, &claims, email, payload.body).await?,
    };

    let session = session::open(&ctx, &user).await?;

    Ok(response::Success::Session(session))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::user::repository::test::insert;
    use crate::types::test::context_with_pool;

    #[sqlx::test(migrations = "./migrations")]
    async fn creating_over_a_concurrent_signup_is_a_conflict(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        insert(&pool, "late@example.com", Role::Client, Status::Active).await;

        let claims = firebase::IdTokenClaims {
            sub: "firebase-uid-1".to_string(),
            email: Some("late@example.com".to_string()),
            name: Some("Late Comer".to_string()),
        };
        let result = create_user(
            &ctx,
            &claims,
            "late@example.com".to_string(),
            request::Body::default(),
        )
        .await;

        assert!(matches!(result, Err(response::Error::EmailAlreadyInUse)));
    }
}
