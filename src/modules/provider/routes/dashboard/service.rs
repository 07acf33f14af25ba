use super::types::{request, response};
use crate::{
    modules::provider::{repository, service as provider_service},
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = payload.auth.user;

    let profile = repository::find_or_create_profile(&ctx.db_conn.pool, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchDashboard)?;

    let month = repository::find_month_stats(&ctx.db_conn.pool, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchDashboard)?;

    let responses = repository::find_response_counts(&ctx.db_conn.pool, user.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchDashboard)?;

    Ok(response::Success::Dashboard(response::Dashboard {
        provider_name: user.full_name,
        is_available: profile.is_available,
        rayon_km: profile.radius_km,
        ca_mois_courant: month.revenue,
        completed_jobs_month: month.completed,
        rating: provider_service::displayed_rating(&user.rating),
        acceptance_rate: responses.acceptance_rate(),
        objectif_mensuel_ca: provider_service::displayed_goal(&profile.monthly_revenue_goal),
    }))
}
