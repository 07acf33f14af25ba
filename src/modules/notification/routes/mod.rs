mod register_token;
mod unregister_token;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(register_token::get_router())
        .merge(unregister_token::get_router())
}
