use super::{Error, Notification, Result};
use crate::{
    modules::{hub::service::HubEvent, order::repository::with_status_label},
    types::Context,
};
use serde_json::json;
use std::sync::Arc;

pub fn event(notification: &Notification) -> Option<HubEvent> {
    match notification {
        Notification::JobAssigned(n) => Some(HubEvent::new(
            "JobAssigned",
            json!({
                "jobId": n.job.id,
                "serviceName": n.service_name,
                "price": n.job.price,
                "address": n.job.address,
                "lat": n.job.lat,
                "lng": n.job.lng,
                "distanceKm": n.job.distance_km,
            }),
        )),
        Notification::JobStatusChanged(n) => Some(HubEvent::new(
            "JobStatusChanged",
            with_status_label(&n.job, n.job.status),
        )),
        Notification::NewMessage(n) => Some(HubEvent::new(
            "NewMessage",
            serde_json::to_value(&n.message).unwrap_or_default(),
        )),
        Notification::ProviderArrived(n) => Some(HubEvent::new(
            "ProviderArrived",
            json!({ "jobId": n.job.id }),
        )),
        _ => None,
    }
}

/// Best effort: users without an open connection simply miss the event.
pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    let (Some(recipient_id), Some(event)) = (notification.recipient_id(), event(&notification))
    else {
        return Err(Error::InvalidNotification);
    };

    let delivered = ctx.hub.send_to_user(&recipient_id, event).await;
    tracing::debug!(
        "Realtime event delivered to {} connections of user {}",
        delivered,
        recipient_id
    );

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::notification::service::test::job;
    use crate::types::test::context;

    #[tokio::test]
    async fn job_assignment_reaches_the_provider_connection() {
        let ctx = context();
        let mut connection = ctx.hub.connect("provider-1").await;

        send(
            ctx.clone(),
            Notification::job_assigned(job("client-1", Some("provider-1")), "Débouchage".to_string()),
        )
        .await
        .unwrap();

        let event = connection.receiver.recv().await.unwrap();
        assert_eq!(event.target, "JobAssigned");
        assert_eq!(event.arguments[0]["jobId"], json!("job-1"));
        assert_eq!(event.arguments[0]["serviceName"], json!("Débouchage"));
    }

    #[tokio::test]
    async fn status_changes_carry_code_and_label() {
        let ctx = context();
        let mut connection = ctx.hub.connect("client-1").await;

        send(
            ctx.clone(),
            Notification::job_status_changed(
                job("client-1", Some("provider-1")),
                "client-1".to_string(),
            ),
        )
        .await
        .unwrap();

        let event = connection.receiver.recv().await.unwrap();
        assert_eq!(event.target, "JobStatusChanged");
        assert_eq!(event.arguments[0]["statusCode"], json!(1));
        assert_eq!(event.arguments[0]["status"], json!("Pending"));
    }

    #[test]
    fn account_reviews_have_no_realtime_event() {
        let user = crate::modules::user::repository::test::user(
            crate::modules::user::repository::Role::Provider,
            crate::modules::user::repository::Status::Active,
        );
        assert!(event(&Notification::provider_validated(user)).is_none());
    }
}
