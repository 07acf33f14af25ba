use crate::types::FirebaseContext;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::{Duration, Instant};

const KEYS_MAX_AGE: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
pub enum Error {
    InvalidToken,
    KeysUnavailable,
}

type Result<T> = std::result::Result<T, Error>;

/// The subset of a Firebase ID token we rely on.
#[derive(Deserialize, Clone, Debug)]
pub struct IdTokenClaims {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

async fn fetch_keys(firebase: &FirebaseContext) -> Result<JwkSet> {
    let keys = reqwest::get(firebase.jwks_url.as_str())
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch Firebase signing keys: {}", err);
            Error::KeysUnavailable
        })?
        .json::<JwkSet>()
        .await
        .map_err(|err| {
            tracing::error!("Failed to parse Firebase signing keys: {}", err);
            Error::KeysUnavailable
        })?;

    *firebase.keys.write().await = Some((keys.clone(), Instant::now()));
    tracing::debug!("Refreshed {} Firebase signing keys", keys.keys.len());

    Ok(keys)
}

async fn decoding_key(firebase: &FirebaseContext, kid: &str) -> Result<DecodingKey> {
    let cached = firebase
        .keys
        .read()
        .await
        .as_ref()
        .filter(|(_, fetched_at)| fetched_at.elapsed() < KEYS_MAX_AGE)
        .and_then(|(keys, _)| keys.find(kid).cloned());

    let jwk = match cached {
        Some(jwk) => jwk,
        None => fetch_keys(firebase)
            .await?
            .find(kid)
            .cloned()
            .ok_or(Error::InvalidToken)?,
    };

    DecodingKey::from_jwk(&jwk).map_err(|err| {
        tracing::error!("Unusable Firebase signing key {}: {}", kid, err);
        Error::KeysUnavailable
    })
}

pub async fn verify_id_token(firebase: &FirebaseContext, token: &str) -> Result<IdTokenClaims> {
    let header = decode_header(token).map_err(|_| Error::InvalidToken)?;
    if header.alg != Algorithm::RS256 {
        return Err(Error::InvalidToken);
    }
    let kid = header.kid.ok_or(Error::InvalidToken)?;

    let key = decoding_key(firebase, &kid).await?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[firebase.project_id.as_str()]);
    validation.set_issuer(&[format!(
        "https://securetoken.google.com/{}",
        firebase.project_id
    )]);

    decode::<IdTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|err| {
            tracing::debug!("Rejected Firebase ID token: {}", err);
            Error::InvalidToken
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn firebase_context() -> FirebaseContext {
        FirebaseContext {
            project_id: "ondemand-test".to_string(),
            jwks_url: "http://127.0.0.1:9/keys".to_string(),
            keys: Arc::new(RwLock::new(None)),
        }
    }

    #[tokio::test]
    async fn rejects_garbage_without_fetching_keys() {
        let firebase = firebase_context();

        assert!(matches!(
            verify_id_token(&firebase, "not-a-jwt").await,
            Err(Error::InvalidToken)
        ));
        assert!(firebase.keys.read().await.is_none());
    }

    #[tokio::test]
    async fn rejects_symmetric_tokens() {
        let firebase = firebase_context();
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some("forged".to_string());
        let token = encode(
            &header,
            &json!({ "sub": "uid-1", "email": "amina@example.com" }),
            &EncodingKey::from_secret(b"guessable"),
        )
        .unwrap();

        assert!(matches!(
            verify_id_token(&firebase, &token).await,
            Err(Error::InvalidToken)
        ));
    }
}
