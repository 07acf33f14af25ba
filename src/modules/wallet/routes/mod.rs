mod get;
mod withdraw;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(get::get_router())
        .merge(withdraw::get_router())
}
