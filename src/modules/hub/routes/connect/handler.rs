use super::service::service;
use super::types::request;
use crate::types::Context;
use axum::{
    extract::{ws::WebSocketUpgrade, Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Query(query): Query<request::Query>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    service(ctx, request::Payload { query, ws }).await
}
