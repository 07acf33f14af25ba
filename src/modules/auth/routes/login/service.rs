use super::types::{request, response};
use crate::{
    modules::{
        auth::service::{password, session},
        user::repository,
    },
    types::Context,
};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user = repository::find_by_email(
        &ctx.db_conn.pool,
        payload.body.email.trim().to_lowercase(),
    )
    .await
    .map_err(|_| response::Error::FailedToFetchUser)?
    .ok_or(response::Error::InvalidCredentials)?;

    if user.uses_firebase() {
        return Err(response::Error::UseFirebaseLogin);
    }

    match password::verify(&payload.body.password, &user.password_hash) {
        Ok(true) => (),
        Ok(false) => return Err(response::Error::InvalidCredentials),
        Err(err) => {
            tracing::error!("Stored password hash of user {} is unusable: {:?}", user.id, err);
            return Err(response::Error::InvalidCredentials);
        }
    }

    let session = session::open(&ctx, &user).await?;

    Ok(response::Success::Session(session))
}
