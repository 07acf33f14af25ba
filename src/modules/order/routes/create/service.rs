use super::types::{request, response};
use crate::{
    modules::{
        catalog,
        notification::service::{dispatch, Backend, Notification},
        order::{repository, service as order_service},
        provider,
        user::repository::Role,
    },
    types::Context,
};
use bigdecimal::{BigDecimal, Zero};
use std::sync::Arc;

struct Assignment {
    provider_id: String,
    distance_km: Option<f64>,
}

async fn assign(
    ctx: &Context,
    requested_provider: Option<String>,
    service_item_id: i32,
    origin: (f64, f64),
) -> Result<Option<Assignment>, response::Error> {
    match requested_provider.filter(|id| !id.trim().is_empty()) {
        Some(provider_id) => {
            let candidate = provider::repository::find_offering_provider(
                &ctx.db_conn.pool,
                provider_id,
                service_item_id,
            )
            .await
            .map_err(|_| response::Error::FailedToCreateJob)?
            .ok_or(response::Error::ProviderUnavailable)?;

            Ok(Some(Assignment {
                distance_km: candidate
                    .position()
                    .map(|position| order_service::distance_km(origin, position)),
                provider_id: candidate.user_id,
            }))
        }
        None => {
            let candidates = provider::repository::find_available_candidates(
                &ctx.db_conn.pool,
                service_item_id,
            )
            .await
            .map_err(|_| response::Error::FailedToCreateJob)?;

            Ok(order_service::nearest(origin, &candidates).map(|(candidate, distance)| {
                Assignment {
                    provider_id: candidate.user_id.clone(),
                    distance_km: Some(distance),
                }
            }))
        }
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    if payload.auth.user.role != Role::Client {
        return Err(response::Error::OnlyClientsCanOrder);
    }

    let body = payload.body;
    if body.price <= BigDecimal::zero() {
        return Err(response::Error::InvalidPrice);
    }

    let item = catalog::repository::find_item_by_id(&ctx.db_conn.pool, body.service_id)
        .await
        .map_err(|_| response::Error::FailedToCreateJob)?
        .ok_or(response::Error::ServiceNotFound)?;

    let origin = (body.lat, body.lng);
    let assignment = assign(&ctx, body.provider_id, item.id, origin).await?;

    let job = repository::create(
        &ctx.db_conn.pool,
        repository::CreateJobPayload {
            client_id: payload.auth.user.id,
            provider_id: assignment.as_ref().map(|a| a.provider_id.clone()),
            service_item_id: item.id,
            price: body.price,
            address: body.address.trim().to_string(),
            lat: body.lat,
            lng: body.lng,
            distance_km: assignment.and_then(|a| a.distance_km),
            scheduled_at: body.date.map(|date| date.naive_utc()),
        },
    )
    .await
    .map_err(|_| response::Error::FailedToCreateJob)?;

    match job.provider_id.as_deref() {
        Some(provider_id) => tracing::info!("Job {} assigned to provider {}", job.id, provider_id),
        None => tracing::info!("Job {} created without an available provider", job.id),
    }

    let job_id = job.id.clone();

    if job.provider_id.is_some() {
        dispatch(
            ctx,
            Notification::job_assigned(job, item.name),
            &[Backend::Push, Backend::Realtime],
        );
    }

    Ok(response::Success::JobCreated { job_id })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::{
        auth::{middleware::Auth, service::jwt::TokenRole},
        provider::repository::test::bookable,
        user::repository::{test::insert, Status},
    };
    use crate::types::test::context_with_pool;

    fn order(service_id: i32) -> request::Body {
        request::Body {
            service_id,
            provider_id: None,
            price: BigDecimal::from(150),
            date: None,
            address: " 12 Rue de la Paix ".to_string(),
            lat: 33.5731,
            lng: -7.5898,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn assigns_the_nearest_available_provider(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let client = insert(&pool, "client@example.com", Role::Client, Status::Active).await;
        let far = bookable(&pool, "far@example.com", 2, (34.0209, -6.8416)).await;
        let near = bookable(&pool, "near@example.com", 2, (33.5800, -7.6000)).await;

        let result = service(
            ctx,
            request::Payload {
                body: order(2),
                auth: Auth {
                    user: client.clone(),
                    role: TokenRole::Client,
                },
            },
        )
        .await;
        let job_id = match result {
            Ok(response::Success::JobCreated { job_id }) => job_id,
            Err(_) => panic!("order was refused"),
        };

        let jobs = sqlx::query_scalar::<_, String>("SELECT id FROM jobs WHERE client_id = $1")
            .bind(&client.id)
            .fetch_all(&pool)
            .await
            .unwrap();
        assert_eq!(jobs, vec![job_id.clone()]);

        let job = repository::find_by_id(&pool, job_id).await.unwrap().unwrap();
        assert_eq!(job.provider_id.as_deref(), Some(near.id.as_str()));
        assert_ne!(job.provider_id.as_deref(), Some(far.id.as_str()));
        assert_eq!(job.status, repository::JobStatus::Pending);
        assert_eq!(job.address, "12 Rue de la Paix");
        assert!(job.distance_km.is_some_and(|km| km < 5.0));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn providers_cannot_order(pool: sqlx::PgPool) {
        let ctx = context_with_pool(pool.clone());
        let provider = bookable(&pool, "pro@example.com", 2, (33.58, -7.60)).await;

        let result = service(
            ctx,
            request::Payload {
                body: order(2),
                auth: Auth {
                    user: provider,
                    role: TokenRole::Provider,
                },
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::OnlyClientsCanOrder)));
        let jobs = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(jobs, 0);
    }
}
