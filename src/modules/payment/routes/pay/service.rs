use super::types::{request, response};
use crate::{
    modules::{
        notification::service::{dispatch, Backend, Notification},
        order::repository::{self as order_repository, JobStatus},
        payment::repository,
    },
    types::Context,
};
use chrono::Utc;
use std::sync::Arc;

fn manual_transaction_id() -> String {
    format!("MANUAL-{}", Utc::now().timestamp_millis())
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let order = payload.order;
    let payer_id = payload.auth.user.id;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    let job = order_repository::find_by_id(&mut *tx, order.job_id)
        .await
        .map_err(|_| response::Error::FailedToPay)?
        .ok_or(response::Error::JobNotFound)?;

    if job.client_id != payer_id {
        return Err(response::Error::NotJobClient);
    }

    match job.status {
        JobStatus::Assigned => {}
        JobStatus::Confirmed => return Err(response::Error::AlreadyPaid),
        status => return Err(response::Error::NotPayable(status)),
    }

    if let Some(price) = order.price.as_ref().filter(|price| **price != job.price) {
        tracing::warn!(
            "Client {} reported {} for job {} priced {}, charging the job price",
            payer_id,
            price,
            job.id,
            job.price
        );
    }

    let job = order_repository::transition(
        &mut *tx,
        job.id,
        JobStatus::Assigned,
        JobStatus::Confirmed,
    )
    .await
    .map_err(|_| response::Error::FailedToPay)?
    .ok_or(response::Error::StatusChanged)?;

    let payment = repository::create(
        &mut *tx,
        repository::CreatePaymentPayload {
            job_id: job.id.clone(),
            payer_id: payer_id.clone(),
            method: order.method,
            transaction_id: order
                .transaction_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(manual_transaction_id),
            amount: job.price.clone(),
        },
    )
    .await
    .map_err(|err| match err {
        repository::Error::AlreadyPaid => response::Error::AlreadyPaid,
        _ => response::Error::FailedToPay,
    })?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    tracing::info!(
        "Job {} paid {} by {} ({})",
        job.id,
        payment.amount,
        payment.method,
        payment.transaction_id
    );

    if let Some(provider_id) = job.provider_id.clone() {
        dispatch(
            ctx,
            Notification::job_status_changed(job, provider_id),
            &[Backend::Push, Backend::Realtime],
        );
    }

    Ok(response::Success::Paid(payment))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::{
        auth::{middleware::Auth, service::jwt::TokenRole},
        payment::repository::PaymentMethod,
        user::repository::{test::insert, Role, Status, User},
    };
    use crate::types::test::context_with_pool;
    use bigdecimal::BigDecimal;

    #[test]
    fn manual_transaction_ids_are_timestamped() {
        let id = manual_transaction_id();
        let millis = id.strip_prefix("MANUAL-").unwrap().parse::<i64>().unwrap();
        assert!(millis > 1_600_000_000_000);
    }

    async fn assigned_job(pool: &sqlx::PgPool, client: &User, provider: &User) -> String {
        let job = order_repository::create(
            pool,
            order_repository::CreateJobPayload {
                client_id: client.id.clone(),
                provider_id: Some(provider.id.clone()),
                service_item_id: 2,
                price: BigDecimal::from(120),
                address: "12 Rue de la Paix".to_string(),
                lat: 33.57,
                lng: -7.59,
                distance_km: Some(1.2),
                scheduled_at: None,
            },
        )
        .await
        .unwrap();
        order_repository::transition(pool, job.id.clone(), JobStatus::Pending, JobStatus::Assigned)
            .await
            .unwrap();
        job.id
    }

    fn pay_as(user: &User, role: TokenRole, job_id: &str) -> request::Payload {
        request::Payload {
            order: request::Order {
                job_id: job_id.to_string(),
                method: PaymentMethod::Cash,
                transaction_id: None,
                price: None,
            },
            auth: Auth {
                user: user.clone(),
                role,
            },
        }
    }

    async fn payments_of(pool: &sqlx::PgPool, job_id: &str) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments WHERE job_id = $1")
            .bind(job_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn only_the_client_of_the_job_can_pay(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let client = insert(&pool, "client@example.com", Role::Client, Status::Active).await;
        let other = insert(&pool, "other@example.com", Role::Client, Status::Active).await;
        let provider = insert(&pool, "pro@example.com", Role::Provider, Status::Active).await;
        let job_id = assigned_job(&pool, &client, &provider).await;

        let stranger = service(ctx.clone(), pay_as(&other, TokenRole::Client, &job_id)).await;
        assert!(matches!(stranger, Err(response::Error::NotJobClient)));

        let own_provider =
            service(ctx.clone(), pay_as(&provider, TokenRole::Provider, &job_id)).await;
        assert!(matches!(own_provider, Err(response::Error::NotJobClient)));

        assert_eq!(payments_of(&pool, &job_id).await, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn a_job_is_paid_once(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let client = insert(&pool, "client@example.com", Role::Client, Status::Active).await;
        let provider = insert(&pool, "pro@example.com", Role::Provider, Status::Active).await;
        let job_id = assigned_job(&pool, &client, &provider).await;

        let first = service(ctx.clone(), pay_as(&client, TokenRole::Client, &job_id)).await;
        match first {
            Ok(response::Success::Paid(payment)) => {
                assert_eq!(payment.amount, BigDecimal::from(120));
                assert!(payment.transaction_id.starts_with("MANUAL-"));
            }
            Err(_) => panic!("first payment was refused"),
        }

        let second = service(ctx.clone(), pay_as(&client, TokenRole::Client, &job_id)).await;
        assert!(matches!(second, Err(response::Error::AlreadyPaid)));

        assert_eq!(payments_of(&pool, &job_id).await, 1);
        let job = order_repository::find_by_id(&pool, job_id).await.unwrap().unwrap();
        assert_eq!(job.status, JobStatus::Confirmed);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn pending_jobs_are_not_payable(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let client = insert(&pool, "client@example.com", Role::Client, Status::Active).await;
        let provider = insert(&pool, "pro@example.com", Role::Provider, Status::Active).await;
        let job_id = assigned_job(&pool, &client, &provider).await;
        sqlx::query("UPDATE jobs SET status = 1 WHERE id = $1")
            .bind(&job_id)
            .execute(&pool)
            .await
            .unwrap();

        let result = service(ctx, pay_as(&client, TokenRole::Client, &job_id)).await;
        assert!(matches!(
            result,
            Err(response::Error::NotPayable(JobStatus::Pending))
        ));
    }
}
