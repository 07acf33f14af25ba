use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::{mpsc, RwLock};
use ulid::Ulid;

/// A realtime event pushed to every open connection of a user.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct HubEvent {
    pub target: String,
    pub arguments: Vec<Value>,
}

impl HubEvent {
    pub fn new(target: &str, payload: Value) -> Self {
        Self {
            target: target.to_string(),
            arguments: vec![payload],
        }
    }
}

pub struct Connection {
    pub id: String,
    pub receiver: mpsc::UnboundedReceiver<HubEvent>,
}

/// Registry of live connections keyed by user id.
#[derive(Default)]
pub struct Hub {
    connections: RwLock<HashMap<String, HashMap<String, mpsc::UnboundedSender<HubEvent>>>>,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn connect(&self, user_id: &str) -> Connection {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = Ulid::new().to_string();

        self.connections
            .write()
            .await
            .entry(user_id.to_string())
            .or_default()
            .insert(id.clone(), sender);

        tracing::debug!("Hub connection {} opened for user {}", id, user_id);

        Connection { id, receiver }
    }

    pub async fn disconnect(&self, user_id: &str, connection_id: &str) {
        let mut connections = self.connections.write().await;

        if let Some(user_connections) = connections.get_mut(user_id) {
            user_connections.remove(connection_id);
            if user_connections.is_empty() {
                connections.remove(user_id);
            }
        }

        tracing::debug!("Hub connection {} closed for user {}", connection_id, user_id);
    }

    /// Returns how many connections accepted the event. Closed senders are pruned.
    pub async fn send_to_user(&self, user_id: &str, event: HubEvent) -> usize {
        let mut connections = self.connections.write().await;

        let Some(user_connections) = connections.get_mut(user_id) else {
            return 0;
        };

        user_connections.retain(|_, sender| sender.send(event.clone()).is_ok());
        let delivered = user_connections.len();

        if user_connections.is_empty() {
            connections.remove(user_id);
        }

        delivered
    }

    pub async fn connection_count(&self, user_id: &str) -> usize {
        self.connections
            .read()
            .await
            .get(user_id)
            .map(|user_connections| user_connections.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn delivers_to_every_connection_of_a_user() {
        let hub = Hub::new();
        let mut phone = hub.connect("provider-1").await;
        let mut tablet = hub.connect("provider-1").await;
        let mut other = hub.connect("client-1").await;

        let event = HubEvent::new("JobAssigned", json!({ "jobId": "job-1", "price": 150 }));
        assert_eq!(hub.send_to_user("provider-1", event.clone()).await, 2);

        assert_eq!(phone.receiver.recv().await, Some(event.clone()));
        assert_eq!(tablet.receiver.recv().await, Some(event));
        assert!(other.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn drops_events_for_disconnected_users() {
        let hub = Hub::new();
        let connection = hub.connect("client-1").await;
        hub.disconnect("client-1", &connection.id).await;

        let event = HubEvent::new("JobStatusChanged", json!({ "jobId": "job-1" }));
        assert_eq!(hub.send_to_user("client-1", event).await, 0);
        assert_eq!(hub.connection_count("client-1").await, 0);
    }

    #[tokio::test]
    async fn prunes_connections_whose_receiver_is_gone() {
        let hub = Hub::new();
        let alive = hub.connect("client-1").await;
        let dropped = hub.connect("client-1").await;
        drop(dropped);

        let event = HubEvent::new("NewMessage", json!({ "content": "J'arrive" }));
        assert_eq!(hub.send_to_user("client-1", event).await, 1);
        assert_eq!(hub.connection_count("client-1").await, 1);
        drop(alive);
    }

    #[test]
    fn serializes_as_target_and_arguments() {
        let event = HubEvent::new("ProviderArrived", json!({ "jobId": "job-9" }));
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "target": "ProviderArrived", "arguments": [{ "jobId": "job-9" }] })
        );
    }
}
