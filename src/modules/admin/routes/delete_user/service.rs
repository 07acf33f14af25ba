use super::types::{request, response};
use crate::{modules::user::repository, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if payload.id == payload.auth.user.id {
        return Err(response::Error::CannotDeleteSelf);
    }

    let deleted = repository::delete_by_id(&ctx.db_conn.pool, payload.id.clone())
        .await
        .map_err(|err| match err {
            repository::Error::StillReferenced => response::Error::HasHistory,
            _ => response::Error::UnexpectedError,
        })?;

    if !deleted {
        return Err(response::Error::UserNotFound);
    }

    tracing::info!("User {} deleted by admin {}", payload.id, payload.auth.user.id);

    Ok(response::Success::UserDeleted)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::{
        auth::middleware::AdminAuth,
        order::repository as order_repository,
        payment::repository as payment_repository,
        user::repository::{test::insert, Role, Status},
        wallet::repository as wallet_repository,
    };
    use crate::types::test::context_with_pool;
    use axum::{http::StatusCode, response::IntoResponse};
    use bigdecimal::BigDecimal;

    #[sqlx::test(migrations = "./migrations")]
    async fn refuses_to_erase_users_with_jobs_and_payments(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let admin = insert(&pool, "admin@example.com", Role::Admin, Status::Active).await;
        let client = insert(&pool, "client@example.com", Role::Client, Status::Active).await;
        let provider = insert(&pool, "pro@example.com", Role::Provider, Status::Active).await;

        let job = order_repository::create(
            &pool,
            order_repository::CreateJobPayload {
                client_id: client.id.clone(),
                provider_id: Some(provider.id.clone()),
                service_item_id: 2,
                price: BigDecimal::from(500),
                address: "12 Rue de la Paix".to_string(),
                lat: 33.57,
                lng: -7.59,
                distance_km: Some(1.5),
                scheduled_at: None,
            },
        )
        .await
        .unwrap();
        sqlx::query("UPDATE jobs SET status = 4 WHERE id = $1")
            .bind(&job.id)
            .execute(&pool)
            .await
            .unwrap();
        payment_repository::create(
            &pool,
            payment_repository::CreatePaymentPayload {
                job_id: job.id.clone(),
                payer_id: client.id.clone(),
                method: payment_repository::PaymentMethod::Cash,
                transaction_id: "MANUAL-1".to_string(),
                amount: BigDecimal::from(500),
            },
        )
        .await
        .unwrap();
        wallet_repository::create_withdrawal(&pool, provider.id.clone(), BigDecimal::from(100))
            .await
            .unwrap();
        let earned_before = wallet_repository::find_earnings(&pool, provider.id.clone())
            .await
            .unwrap();

        for target in [client.id.clone(), provider.id.clone()] {
            let result = service(
                ctx.clone(),
                request::Payload {
                    id: target,
                    auth: AdminAuth {
                        user: admin.clone(),
                    },
                },
            )
            .await;
            let response = match result {
                Ok(_) => panic!("user with history was deleted"),
                Err(err) => err.into_response(),
            };
            assert_eq!(response.status(), StatusCode::CONFLICT);
        }

        let earned_after = wallet_repository::find_earnings(&pool, provider.id.clone())
            .await
            .unwrap();
        assert_eq!(earned_before.len(), 1);
        assert_eq!(earned_after.len(), 1);
        assert_eq!(earned_after[0].amount, BigDecimal::from(500));
        assert!(order_repository::find_by_id(&pool, job.id).await.unwrap().is_some());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn deletes_users_without_history(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let admin = insert(&pool, "admin@example.com", Role::Admin, Status::Active).await;
        let client = insert(&pool, "client@example.com", Role::Client, Status::Active).await;

        let result = service(
            ctx,
            request::Payload {
                id: client.id,
                auth: AdminAuth { user: admin },
            },
        )
        .await;

        assert!(matches!(result, Ok(response::Success::UserDeleted)));
    }
}
