mod create;
mod get;
mod my_jobs;
mod provider_history;
mod respond;
mod send_message;
mod update_status;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(create::get_router())
        .merge(my_jobs::get_router())
        .merge(provider_history::get_router())
        .merge(get::get_router())
        .merge(respond::get_router())
        .merge(update_status::get_router())
        .merge(send_message::get_router())
}
