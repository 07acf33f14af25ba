use super::service::service;
use super::types::request;
use crate::{modules::auth::middleware::ProviderAuth, types::Context};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    auth: ProviderAuth,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    service(ctx, request::Payload { job_id, auth }).await
}
