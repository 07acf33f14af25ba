use super::service::service;
use super::types::request;
use crate::{modules::auth::middleware::ProviderAuth, types::Context};
use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use serde_json::Value;
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    auth: ProviderAuth,
    Json(schedule): Json<Value>,
) -> impl IntoResponse {
    service(ctx, request::Payload { schedule, auth }).await
}
