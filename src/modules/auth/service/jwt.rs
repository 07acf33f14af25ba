use crate::{
    modules::user::repository::{Role, User},
    types::JwtContext,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[derive(Debug)]
pub enum Error {
    EncodingFailed,
    InvalidToken,
}

type Result<T> = std::result::Result<T, Error>;

/// The role carried by an app token. Pending providers get a restricted one.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenRole {
    #[serde(rename = "client")]
    Client,
    #[serde(rename = "provider")]
    Provider,
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "provider_pending_onboarding")]
    ProviderPendingOnboarding,
}

impl TokenRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenRole::Client => "client",
            TokenRole::Provider => "provider",
            TokenRole::Admin => "admin",
            TokenRole::ProviderPendingOnboarding => "provider_pending_onboarding",
        }
    }
}

impl From<Role> for TokenRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Client => TokenRole::Client,
            Role::Provider => TokenRole::Provider,
            Role::Admin => TokenRole::Admin,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: TokenRole,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

pub fn issue(jwt: &JwtContext, user: &User, role: TokenRole) -> Result<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.clone(),
        email: user.email.clone(),
        name: user.full_name.clone(),
        role,
        jti: Ulid::new().to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(jwt.expire_minutes)).timestamp(),
        iss: jwt.issuer.clone(),
        aud: jwt.audience.clone(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt.key.as_bytes()),
    )
    .map_err(|err| {
        tracing::error!("Failed to sign access token for user {}: {}", user.id, err);
        Error::EncodingFailed
    })
}

pub fn verify(jwt: &JwtContext, token: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[jwt.issuer.as_str()]);
    validation.set_audience(&[jwt.audience.as_str()]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.key.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|err| {
        tracing::debug!("Rejected access token: {}", err);
        Error::InvalidToken
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::user::repository::{self, Status};

    fn jwt_context() -> JwtContext {
        JwtContext {
            key: "test-signing-key-with-enough-entropy-for-hs256".to_string(),
            issuer: "OnDemandApp".to_string(),
            audience: "OnDemandAppClients".to_string(),
            expire_minutes: 60,
        }
    }

    #[test]
    fn issued_token_carries_the_role_claim() {
        let jwt = jwt_context();
        let user = repository::test::user(Role::Provider, Status::Active);

        let token = issue(&jwt, &user, TokenRole::from(user.role)).unwrap();
        let claims = verify(&jwt, &token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, TokenRole::Provider);
        assert_eq!(claims.name, "Amina Diallo");
        assert_eq!(claims.iss, "OnDemandApp");
    }

    #[test]
    fn restricted_role_serializes_with_its_wire_name() {
        assert_eq!(
            serde_json::to_value(TokenRole::ProviderPendingOnboarding).unwrap(),
            serde_json::json!("provider_pending_onboarding")
        );
    }

    #[test]
    fn rejects_tokens_for_another_audience() {
        let jwt = jwt_context();
        let user = repository::test::user(Role::Client, Status::Active);
        let token = issue(
            &JwtContext {
                audience: "SomeoneElse".to_string(),
                ..jwt.clone()
            },
            &user,
            TokenRole::Client,
        )
        .unwrap();

        assert!(verify(&jwt, &token).is_err());
    }

    #[test]
    fn rejects_expired_tokens() {
        let jwt = jwt_context();
        let user = repository::test::user(Role::Client, Status::Active);
        let token = issue(
            &JwtContext {
                expire_minutes: -10,
                ..jwt.clone()
            },
            &user,
            TokenRole::Client,
        )
        .unwrap();

        assert!(verify(&jwt, &token).is_err());
    }

    #[test]
    fn rejects_tokens_signed_with_another_key() {
        let jwt = jwt_context();
        let user = repository::test::user(Role::Admin, Status::Active);
        let token = issue(
            &JwtContext {
                key: "a-completely-different-signing-key".to_string(),
                ..jwt.clone()
            },
            &user,
            TokenRole::Admin,
        )
        .unwrap();

        assert!(verify(&jwt, &token).is_err());
    }
}
