use crate::modules::{auth::repository, user::repository::User};
use chrono::{Duration, NaiveDateTime, Utc};
use rand::Rng;
use sha2::Digest;
use sqlx::{Postgres, Transaction};

pub const EMAIL_CONFIRMATION: &str = "email_confirmation";

const VALIDITY_MINUTES: i64 = 15;
const RESEND_AFTER_SECONDS: i64 = 60;
/// Wrong guesses tolerated before a code is burnt and a new one must be requested.
pub const MAX_ATTEMPTS: i32 = 5;

#[derive(Eq, PartialEq, Debug)]
pub enum IssueError {
    NotSent,
    TooSoon,
}

#[derive(Eq, PartialEq, Debug)]
pub enum VerificationError {
    Expired,
    InvalidCode,
    TooManyAttempts,
    UnexpectedError,
}

pub fn generate() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

fn hash(purpose: &str, user_id: &str, code: &str) -> String {
    let mut hasher = sha2::Sha256::new();
    hasher.update(format!("{}-{}-{}", purpose, user_id, code.trim()));
    base16ct::lower::encode_string(&hasher.finalize())
}

fn can_reissue(last: Option<&repository::AuthCode>, now: NaiveDateTime) -> bool {
    match last {
        Some(code) => now - code.created_at >= Duration::seconds(RESEND_AFTER_SECONDS),
        None => true,
    }
}

fn check(
    stored: &repository::AuthCode,
    user_id: &str,
    code: &str,
    now: NaiveDateTime,
) -> Result<(), VerificationError> {
    if stored.consumed_at.is_some() {
        return Err(VerificationError::InvalidCode);
    }

    if stored.failed_attempts >= MAX_ATTEMPTS {
        return Err(VerificationError::TooManyAttempts);
    }

    if now > stored.expires_at {
        return Err(VerificationError::Expired);
    }

    if hash(&stored.purpose, user_id, code) != stored.hash {
        return Err(VerificationError::InvalidCode);
    }

    Ok(())
}

/// Stores a fresh code and returns it in clear so it can be mailed.
pub async fn issue(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    purpose: &str,
) -> Result<String, IssueError> {
    let now = Utc::now().naive_utc();

    let last = repository::find_latest(&mut **tx, user.id.clone(), purpose.to_string())
        .await
        .map_err(|_| IssueError::NotSent)?;

    if !can_reissue(last.as_ref(), now) {
        return Err(IssueError::TooSoon);
    }

    let code = generate();

    repository::create(
        &mut **tx,
        repository::CreateAuthCodePayload {
            user_id: user.id.clone(),
            purpose: purpose.to_string(),
            hash: hash(purpose, &user.id, &code),
            expires_at: now + Duration::minutes(VALIDITY_MINUTES),
        },
    )
    .await
    .map_err(|_| IssueError::NotSent)?;

    Ok(code)
}

/// Only the latest code for a purpose is accepted; it is consumed on success.
/// A wrong guess is counted on `tx`, so callers commit it even when verification fails.
pub async fn verify(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    purpose: &str,
    code: &str,
) -> Result<(), VerificationError> {
    let stored = repository::find_latest(&mut **tx, user.id.clone(), purpose.to_string())
        .await
        .map_err(|_| VerificationError::UnexpectedError)?
        .ok_or(VerificationError::InvalidCode)?;

    match check(&stored, &user.id, code, Utc::now().naive_utc()) {
        Err(VerificationError::InvalidCode) if stored.consumed_at.is_none() => {
            repository::record_failure(&mut **tx, stored.id)
                .await
                .map_err(|_| VerificationError::UnexpectedError)?;
            return Err(VerificationError::InvalidCode);
        }
        result => result?,
    }

    repository::consume(&mut **tx, stored.id)
        .await
        .map_err(|_| VerificationError::UnexpectedError)
}

#[cfg(test)]
mod test {
    use super::*;

    fn stored_code(user_id: &str, code: &str, created_at: NaiveDateTime) -> repository::AuthCode {
        repository::AuthCode {
            id: "code-1".to_string(),
            user_id: user_id.to_string(),
            purpose: EMAIL_CONFIRMATION.to_string(),
            hash: hash(EMAIL_CONFIRMATION, user_id, code),
            expires_at: created_at + Duration::minutes(VALIDITY_MINUTES),
            consumed_at: None,
            failed_attempts: 0,
            created_at,
        }
    }

    #[test]
    fn generates_six_digit_codes() {
        for _ in 0..50 {
            let code = generate();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn accepts_the_matching_code_before_expiry() {
        let now = Utc::now().naive_utc();
        let stored = stored_code("user-1", "042917", now);

        assert_eq!(check(&stored, "user-1", "042917", now), Ok(()));
        assert_eq!(check(&stored, "user-1", " 042917 ", now), Ok(()));
    }

    #[test]
    fn rejects_wrong_expired_or_consumed_codes() {
        let now = Utc::now().naive_utc();
        let stored = stored_code("user-1", "042917", now);

        assert_eq!(
            check(&stored, "user-1", "111111", now),
            Err(VerificationError::InvalidCode)
        );
        assert_eq!(
            check(&stored, "user-2", "042917", now),
            Err(VerificationError::InvalidCode)
        );
        assert_eq!(
            check(&stored, "user-1", "042917", now + Duration::minutes(16)),
            Err(VerificationError::Expired)
        );

        let consumed = repository::AuthCode {
            consumed_at: Some(now),
            ..stored
        };
        assert_eq!(
            check(&consumed, "user-1", "042917", now),
            Err(VerificationError::InvalidCode)
        );
    }

    #[test]
    fn refuses_the_right_code_once_attempts_run_out() {
        let now = Utc::now().naive_utc();
        let stored = stored_code("user-1", "042917", now);

        let nearly = repository::AuthCode {
            failed_attempts: MAX_ATTEMPTS - 1,
            ..stored.clone()
        };
        assert_eq!(check(&nearly, "user-1", "042917", now), Ok(()));

        let exhausted = repository::AuthCode {
            failed_attempts: MAX_ATTEMPTS,
            ..stored
        };
        assert_eq!(
            check(&exhausted, "user-1", "042917", now),
            Err(VerificationError::TooManyAttempts)
        );
    }

    #[test]
    fn throttles_reissue_within_a_minute() {
        let now = Utc::now().naive_utc();
        let recent = stored_code("user-1", "042917", now - Duration::seconds(20));
        let old = stored_code("user-1", "042917", now - Duration::seconds(90));

        assert!(!can_reissue(Some(&recent), now));
        assert!(can_reissue(Some(&old), now));
        assert!(can_reissue(None, now));
    }
}
