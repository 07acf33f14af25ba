mod firebase_login;
mod login;
mod me;
mod register;
mod resend_verification;
mod toggle_two_factor;
mod verify_email;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(register::get_router())
        .merge(login::get_router())
        .merge(firebase_login::get_router())
        .merge(verify_email::get_router())
        .merge(resend_verification::get_router())
        .merge(me::get_router())
        .merge(toggle_two_factor::get_router())
}
