mod categories;
mod category_items;
mod search;
mod service_detail;
mod tree;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(categories::get_router())
        .merge(category_items::get_router())
        .merge(service_detail::get_router())
        .merge(search::get_router())
        .merge(tree::get_router())
}
