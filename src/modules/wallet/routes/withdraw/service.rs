use super::types::{request, response};
use crate::{
    modules::wallet::{repository, service as wallet_service},
    types::Context,
};
use chrono::Utc;
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let provider_id = payload.auth.user.id;
    let amount = payload.body.amount;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    repository::lock_provider(&mut *tx, provider_id.clone())
        .await
        .map_err(|_| response::Error::FailedToWithdraw)?;

    let earnings = repository::find_earnings(&mut *tx, provider_id.clone())
        .await
        .map_err(|_| response::Error::FailedToWithdraw)?;

    let withdrawals = repository::find_withdrawals(&mut *tx, provider_id.clone())
        .await
        .map_err(|_| response::Error::FailedToWithdraw)?;

    let summary = wallet_service::summarize(
        &earnings,
        &withdrawals,
        &ctx.payment.commission_rate,
        Utc::now().naive_utc(),
    );

    wallet_service::check_withdrawal(&amount, &summary.balance).map_err(|err| match err {
        wallet_service::WithdrawalError::BelowMinimum => response::Error::BelowMinimum,
        wallet_service::WithdrawalError::InsufficientFunds => response::Error::InsufficientFunds,
    })?;

    let withdrawal = repository::create_withdrawal(&mut *tx, provider_id.clone(), amount)
        .await
        .map_err(|_| response::Error::FailedToWithdraw)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!(
        "Provider {} requested a withdrawal of {}",
        provider_id,
        withdrawal.amount
    );

    Ok(response::Success::WithdrawalPlaced(withdrawal))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::{
        auth::middleware::ProviderAuth,
        order::repository as order_repository,
        payment::repository as payment_repository,
        user::repository::{test::insert, Role, Status, User},
    };
    use crate::types::test::context_with_pool;
    use bigdecimal::BigDecimal;

    /// Leaves the provider with 425 to withdraw at the default 15% commission.
    async fn provider_with_earnings(pool: &sqlx::PgPool) -> User {
        let client = insert(pool, "client@example.com", Role::Client, Status::Active).await;
        let provider = insert(pool, "pro@example.com", Role::Provider, Status::Active).await;
        let job = order_repository::create(
            pool,
            order_repository::CreateJobPayload {
                client_id: client.id.clone(),
                provider_id: Some(provider.id.clone()),
                service_item_id: 4,
                price: BigDecimal::from(500),
                address: "12 Rue de la Paix".to_string(),
                lat: 33.57,
                lng: -7.59,
                distance_km: None,
                scheduled_at: None,
            },
        )
        .await
        .unwrap();
        payment_repository::create(
            pool,
            payment_repository::CreatePaymentPayload {
                job_id: job.id.clone(),
                payer_id: client.id,
                method: payment_repository::PaymentMethod::Cash,
                transaction_id: "MANUAL-1".to_string(),
                amount: BigDecimal::from(500),
            },
        )
        .await
        .unwrap();
        sqlx::query("UPDATE jobs SET status = $1 WHERE id = $2")
            .bind(i32::from(order_repository::JobStatus::Completed))
            .bind(&job.id)
            .execute(pool)
            .await
            .unwrap();
        provider
    }

    fn withdraw(provider: &User, amount: i32) -> request::Payload {
        request::Payload {
            body: request::Body {
                amount: BigDecimal::from(amount),
            },
            auth: ProviderAuth {
                user: provider.clone(),
            },
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn rejects_amounts_below_minimum_or_above_balance(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let provider = provider_with_earnings(&pool).await;

        let small = service(ctx.clone(), withdraw(&provider, 99)).await;
        assert!(matches!(small, Err(response::Error::BelowMinimum)));

        let large = service(ctx.clone(), withdraw(&provider, 426)).await;
        assert!(matches!(large, Err(response::Error::InsufficientFunds)));

        let placed = service(ctx.clone(), withdraw(&provider, 400)).await;
        assert!(matches!(placed, Ok(response::Success::WithdrawalPlaced(_))));

        let overdrawn = service(ctx, withdraw(&provider, 100)).await;
        assert!(matches!(overdrawn, Err(response::Error::InsufficientFunds)));

        let withdrawals = repository::find_withdrawals(&pool, provider.id).await.unwrap();
        assert_eq!(withdrawals.len(), 1);
    }
}
