use super::types::{request, response};
use crate::{
    modules::{auth::service::code, user::repository},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    let user = repository::find_by_email(&mut *tx, payload.body.email.trim().to_lowercase())
        .await
        .map_err(|_| response::Error::FailedToFetchUser)?
        .ok_or(response::Error::UserNotFound)?;

    if let Err(err) = code::verify(&mut tx, &user, code::EMAIL_CONFIRMATION, &payload.body.code).await
    {
        if err == code::VerificationError::InvalidCode {
            // keep the failed attempt counted
            tx.commit().await.map_err(|err| {
                tracing::error!("Failed to commit database transaction: {}", err);
                response::Error::UnexpectedError
            })?;
        }

        return Err(match err {
            code::VerificationError::Expired => response::Error::ExpiredCode,
            code::VerificationError::InvalidCode => response::Error::InvalidCode,
            code::VerificationError::TooManyAttempts => response::Error::TooManyAttempts,
            code::VerificationError::UnexpectedError => response::Error::UnexpectedError,
        });
    }

    repository::confirm_email(&mut *tx, user.id.clone())
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!("Email of user {} confirmed", user.id);

    Ok(response::Success::EmailVerified)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::user::repository::{test::insert, Role, Status};
    use crate::types::test::context_with_pool;

    fn attempt(email: &str, code: &str) -> request::Payload {
        request::Payload {
            body: request::Body {
                email: email.to_string(),
                code: code.to_string(),
            },
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn locks_the_code_after_repeated_wrong_guesses(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let user = insert(&pool, "guess@example.com", Role::Client, Status::Active).await;

        let mut tx = pool.begin().await.unwrap();
        let real = code::issue(&mut tx, &user, code::EMAIL_CONFIRMATION)
            .await
            .unwrap();
        tx.commit().await.unwrap();
        let wrong = if real == "000000" { "000001" } else { "000000" };

        for _ in 0..code::MAX_ATTEMPTS {
            let result = service(ctx.clone(), attempt("guess@example.com", wrong)).await;
            assert!(matches!(result, Err(response::Error::InvalidCode)));
        }

        let result = service(ctx.clone(), attempt("guess@example.com", &real)).await;
        assert!(matches!(result, Err(response::Error::TooManyAttempts)));

        let consumed = sqlx::query_scalar::<_, bool>(
            "SELECT consumed_at IS NOT NULL FROM auth_codes WHERE user_id = $1",
        )
        .bind(&user.id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert!(!consumed);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn accepts_the_right_code_after_a_few_misses(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let user = insert(&pool, "typo@example.com", Role::Client, Status::Active).await;

        let mut tx = pool.begin().await.unwrap();
        let real = code::issue(&mut tx, &user, code::EMAIL_CONFIRMATION)
            .await
            .unwrap();
        tx.commit().await.unwrap();
        let wrong = if real == "000000" { "000001" } else { "000000" };

        for _ in 1..code::MAX_ATTEMPTS {
            let _ = service(ctx.clone(), attempt("typo@example.com", wrong)).await;
        }

        let result = service(ctx, attempt("typo@example.com", &real)).await;
        assert!(matches!(result, Ok(response::Success::EmailVerified)));
    }
}
