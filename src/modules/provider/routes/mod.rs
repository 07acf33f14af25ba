mod arrive;
mod assigned_jobs;
mod dashboard;
mod get_schedule;
mod list_services;
mod onboarding;
mod update_availability;
mod update_schedule;
mod upsert_service;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(dashboard::get_router())
        .merge(update_availability::get_router())
        .merge(get_schedule::get_router())
        .merge(update_schedule::get_router())
        .merge(onboarding::get_router())
        .merge(list_services::get_router())
        .merge(upsert_service::get_router())
        .merge(assigned_jobs::get_router())
        .merge(arrive::get_router())
}
