mod activity;
mod commissions;
mod delete_user;
mod jobs;
mod list_users;
mod overview;
mod payments;
mod pending_providers;
mod reject_provider;
mod services_stats;
mod update_user;
mod validate_provider;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(overview::get_router())
        .merge(jobs::get_router())
        .merge(payments::get_router())
        .merge(activity::get_router())
        .merge(list_users::get_router())
        .merge(update_user::get_router())
        .merge(delete_user::get_router())
        .merge(pending_providers::get_router())
        .merge(validate_provider::get_router())
        .merge(reject_provider::get_router())
        .merge(services_stats::get_router())
        .merge(commissions::get_router())
}
