use super::service::jwt::{self, TokenRole};
use crate::modules::user;
use crate::modules::user::repository::{Role, Status, User};
use crate::types::Context;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum::{extract::Extension, http, http::request::Parts, response::Response};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug)]
pub enum Error {
    InvalidSession,
}

fn get_token_from_header(header: &str) -> Result<&str, Error> {
    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => Err(Error::InvalidSession),
    }
}

/// Verifies an app token and loads its user. Banned or deleted users are rejected.
pub async fn get_user_from_token(ctx: &Context, token: &str) -> Result<(User, TokenRole), Error> {
    let claims = jwt::verify(&ctx.jwt, token).map_err(|_| Error::InvalidSession)?;

    let user = user::repository::find_by_id(&ctx.db_conn.pool, claims.sub)
        .await
        .map_err(|_| Error::InvalidSession)?
        .ok_or(Error::InvalidSession)?;

    if user.status == Status::Banned {
        return Err(Error::InvalidSession);
    }

    Ok((user, claims.role))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Invalid session token"})),
    )
        .into_response()
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, Json(json!({ "error": "Forbidden" }))).into_response()
}

async fn get_auth_from_request(parts: &mut Parts) -> Result<Auth, Response> {
    let Extension(ctx) = parts
        .extract::<Extension<Arc<Context>>>()
        .await
        .map_err(|err| {
            tracing::error!("Context extension is missing: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })?;

    let header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(unauthorized)?;

    let token = get_token_from_header(header).map_err(|_| unauthorized())?;

    get_user_from_token(&ctx, token)
        .await
        .map(|(user, role)| Auth { user, role })
        .map_err(|_| unauthorized())
}

#[derive(Serialize, Clone)]
pub struct Auth {
    pub user: User,
    pub role: TokenRole,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        get_auth_from_request(parts).await
    }
}

/// A provider holding a full provider token.
#[derive(Serialize, Clone)]
pub struct ProviderAuth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ProviderAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let auth = get_auth_from_request(parts).await?;

        match (auth.role, auth.user.role) {
            (TokenRole::Provider, Role::Provider) => Ok(Self { user: auth.user }),
            _ => Err(forbidden()),
        }
    }
}

/// A provider, including one still going through onboarding.
#[derive(Serialize, Clone)]
pub struct OnboardingAuth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for OnboardingAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let auth = get_auth_from_request(parts).await?;

        match (auth.role, auth.user.role) {
            (TokenRole::Provider | TokenRole::ProviderPendingOnboarding, Role::Provider) => {
                Ok(Self { user: auth.user })
            }
            _ => Err(forbidden()),
        }
    }
}

#[derive(Serialize, Clone)]
pub struct AdminAuth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let auth = get_auth_from_request(parts).await?;

        if auth.role != TokenRole::Admin || !user::repository::is_admin(&auth.user) {
            return Err(forbidden());
        }

        Ok(Self { user: auth.user })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reads_bearer_tokens_only() {
        assert!(matches!(get_token_from_header("Bearer abc.def"), Ok("abc.def")));
        assert!(matches!(get_token_from_header("bearer abc"), Ok("abc")));
        assert!(get_token_from_header("Basic dXNlcjpwYXNz").is_err());
        assert!(get_token_from_header("Bearer").is_err());
        assert!(get_token_from_header("Bearer ").is_err());
    }
}
