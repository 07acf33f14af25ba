use super::types::{request, response};
use crate::{modules::auth::middleware::get_user_from_token, types::Context};
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let token = payload
        .query
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(response::Error::InvalidSession)?;

    let (user, _) = get_user_from_token(&ctx, &token)
        .await
        .map_err(|_| response::Error::InvalidSession)?;

    Ok(response::Success::Upgraded(
        payload
            .ws
            .on_upgrade(move |socket| session(ctx, user.id, socket)),
    ))
}

/// Pumps hub events to the socket until either side goes away.
async fn session(ctx: Arc<Context>, user_id: String, socket: WebSocket) {
    let mut connection = ctx.hub.connect(&user_id).await;
    let connection_id = connection.id.clone();
    let (mut sink, mut stream) = socket.split();

    let mut outgoing = tokio::spawn(async move {
        while let Some(event) = connection.receiver.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(err) => {
                    tracing::error!("Failed to serialize hub event {}: {}", event.target, err);
                    continue;
                }
            };

            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let mut incoming = tokio::spawn(async move {
        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
    });

    tokio::select! {
        _ = &mut outgoing => incoming.abort(),
        _ = &mut incoming => outgoing.abort(),
    }

    ctx.hub.disconnect(&user_id, &connection_id).await;
}
