use super::service::service;
use super::types::request;
use crate::types::Context;
use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use std::sync::Arc;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    authorization: Option<TypedHeader<Authorization<Bearer>>>,
    body: Option<Json<request::Body>>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            id_token: authorization.map(|TypedHeader(auth)| auth.token().to_string()),
            body: body.map(|Json(body)| body).unwrap_or_default(),
        },
    )
    .await
}
