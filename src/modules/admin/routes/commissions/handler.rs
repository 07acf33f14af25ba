use super::service::service;
use super::types::request;
use crate::{modules::auth::middleware::AdminAuth, types::Context};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
    Query(query): Query<request::Query>,
) -> impl IntoResponse {
    service(ctx, request::Payload { query }).await
}
