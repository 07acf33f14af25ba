use super::{admin, auth, catalog, notification, order, payment, provider, wallet};
use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

/// Every REST route, to be nested under `/api`.
pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/auth", auth::routes::get_router())
        .nest("/provider", provider::routes::get_router())
        .nest("/catalog", catalog::routes::get_router())
        .nest("/orders", order::routes::get_router())
        .nest("/payments", payment::routes::get_router())
        .nest("/wallet", wallet::routes::get_router())
        .nest("/notifications", notification::routes::get_router())
        .nest("/admin", admin::routes::get_router())
}
