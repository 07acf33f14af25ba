use super::{Error, Notification, Result};
use crate::{modules::notification::repository, types::Context};
use oauth_fcm::{send_fcm_message, FcmError, FcmNotification, NetworkError};
use std::sync::Arc;

/// FCM answers 404 UNREGISTERED once the app was uninstalled or the token rotated.
fn is_unregistered(err: &FcmError) -> bool {
    match err {
        FcmError::FcmNetworkError(NetworkError::ServerError(status, text)) => {
            *status == 404 || text.as_deref().is_some_and(|text| text.contains("UNREGISTERED"))
        }
        _ => false,
    }
}

/// Sends one FCM message per registered device of the recipient.
/// Devices FCM no longer knows are forgotten.
pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    let Some(recipient_id) = notification.recipient_id() else {
        return Err(Error::InvalidNotification);
    };

    let Some(google) = ctx.google.as_ref() else {
        tracing::debug!(
            "Push is disabled, dropping notification for user {}",
            recipient_id
        );
        return Ok(());
    };

    let tokens =
        repository::push_token::find_many_by_user_id(&ctx.db_conn.pool, recipient_id.clone())
            .await
            .map_err(|_| Error::NotSent)?;

    if tokens.is_empty() {
        tracing::debug!("User {} has no registered device", recipient_id);
        return Ok(());
    }

    let content = notification.content();
    let mut delivered = 0;

    for token in tokens.iter() {
        match send_fcm_message(
            &token.token,
            Some(FcmNotification {
                title: content.title.clone(),
                body: content.body.clone(),
            }),
            Some(content.data.clone()),
            &google.fcm_token_manager,
            &google.fcm_project_id,
        )
        .await
        {
            Ok(_) => delivered += 1,
            Err(err) if is_unregistered(&err) => {
                tracing::info!(
                    "Device {} of user {} is no longer registered, removing it",
                    token.id,
                    recipient_id
                );
                let _ = repository::push_token::delete(
                    &ctx.db_conn.pool,
                    recipient_id.clone(),
                    token.token.clone(),
                )
                .await;
            }
            Err(err) => tracing::error!(
                "Failed to send push notification to device {} of user {}: {:?}",
                token.id,
                recipient_id,
                err
            ),
        }
    }

    tracing::debug!(
        "Push delivered to {}/{} devices of user {}",
        delivered,
        tokens.len(),
        recipient_id
    );

    match delivered {
        0 => Err(Error::NotSent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn only_unregistered_devices_are_pruned() {
        let gone = FcmError::FcmNetworkError(NetworkError::ServerError(
            404,
            Some(r#"{"error":{"status":"NOT_FOUND","details":[{"errorCode":"UNREGISTERED"}]}}"#.to_string()),
        ));
        assert!(is_unregistered(&gone));

        let rotated = FcmError::FcmNetworkError(NetworkError::ServerError(
            400,
            Some(r#"{"error":{"details":[{"errorCode":"UNREGISTERED"}]}}"#.to_string()),
        ));
        assert!(is_unregistered(&rotated));

        let throttled = FcmError::FcmNetworkError(NetworkError::ServerError(429, None));
        assert!(!is_unregistered(&throttled));

        let auth_failed = FcmError::OAuthNetworkError(NetworkError::ServerError(404, None));
        assert!(!is_unregistered(&auth_failed));
    }
}
