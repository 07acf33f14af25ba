pub mod email;
pub mod push;
pub mod realtime;

use crate::{
    modules::{
        order::repository::{Job, JobMessage},
        user::repository::User,
    },
    types::Context,
};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Email,
    Push,
    Realtime,
}

pub mod types {
    use super::{Job, JobMessage, User};

    #[derive(Clone)]
    pub struct EmailVerificationRequested {
        pub user: User,
        pub code: String,
    }

    #[derive(Clone)]
    pub struct JobAssigned {
        pub job: Job,
        pub service_name: String,
    }

    #[derive(Clone)]
    pub struct JobStatusChanged {
        pub job: Job,
        pub recipient_id: String,
    }

    #[derive(Clone)]
    pub struct NewMessage {
        pub message: JobMessage,
        pub recipient_id: String,
    }

    #[derive(Clone)]
    pub struct ProviderArrived {
        pub job: Job,
    }

    #[derive(Clone)]
    pub struct ProviderReviewed {
        pub user: User,
    }
}

#[derive(Clone)]
pub enum Notification {
    EmailVerificationRequested(types::EmailVerificationRequested),
    JobAssigned(types::JobAssigned),
    JobStatusChanged(types::JobStatusChanged),
    NewMessage(types::NewMessage),
    ProviderArrived(types::ProviderArrived),
    ProviderValidated(types::ProviderReviewed),
    ProviderRejected(types::ProviderReviewed),
}

impl Notification {
    pub fn email_verification_requested(user: User, code: String) -> Self {
        Notification::EmailVerificationRequested(types::EmailVerificationRequested { user, code })
    }

    pub fn job_assigned(job: Job, service_name: String) -> Self {
        Notification::JobAssigned(types::JobAssigned { job, service_name })
    }

    pub fn job_status_changed(job: Job, recipient_id: String) -> Self {
        Notification::JobStatusChanged(types::JobStatusChanged { job, recipient_id })
    }

    pub fn new_message(message: JobMessage, recipient_id: String) -> Self {
        Notification::NewMessage(types::NewMessage {
            message,
            recipient_id,
        })
    }

    pub fn provider_arrived(job: Job) -> Self {
        Notification::ProviderArrived(types::ProviderArrived { job })
    }

    pub fn provider_validated(user: User) -> Self {
        Notification::ProviderValidated(types::ProviderReviewed { user })
    }

    pub fn provider_rejected(user: User) -> Self {
        Notification::ProviderRejected(types::ProviderReviewed { user })
    }

    pub fn recipient_id(&self) -> Option<String> {
        match self {
            Notification::EmailVerificationRequested(n) => Some(n.user.id.clone()),
            Notification::JobAssigned(n) => n.job.provider_id.clone(),
            Notification::JobStatusChanged(n) => Some(n.recipient_id.clone()),
            Notification::NewMessage(n) => Some(n.recipient_id.clone()),
            Notification::ProviderArrived(n) => Some(n.job.client_id.clone()),
            Notification::ProviderValidated(n) | Notification::ProviderRejected(n) => {
                Some(n.user.id.clone())
            }
        }
    }

    pub fn content(&self) -> Content {
        match self {
            Notification::EmailVerificationRequested(n) => Content::new(
                "Confirmez votre adresse email",
                format!("Votre code de vérification est {}", n.code),
            ),
            Notification::JobAssigned(n) => Content::new(
                "Nouvelle mission 🛠️",
                format!("{} pour {} MAD", n.service_name, n.job.price),
            )
            .with("type", "job_assigned")
            .with("jobId", &n.job.id),
            Notification::JobStatusChanged(n) => Content::new(
                "Mise à jour de la mission",
                format!("Statut : {}", n.job.status.label()),
            )
            .with("type", "job_status_changed")
            .with("jobId", &n.job.id)
            .with("status", &i32::from(n.job.status).to_string()),
            Notification::NewMessage(n) => {
                Content::new(format!("Message de {}", n.message.sender_name), n.message.content.clone())
                    .with("type", "new_message")
                    .with("jobId", &n.message.job_id)
            }
            Notification::ProviderArrived(n) => Content::new(
                "Le prestataire est là ! 📍",
                "Votre prestataire est arrivé à l'adresse.",
            )
            .with("type", "provider_arrived")
            .with("jobId", &n.job.id),
            Notification::ProviderValidated(_) => Content::new(
                "Compte validé ✅",
                "Votre compte prestataire a été validé. Vous pouvez maintenant recevoir des missions.",
            )
            .with("type", "provider_validated"),
            Notification::ProviderRejected(_) => Content::new(
                "Dossier à compléter",
                "Votre dossier prestataire n'a pas été retenu. Merci de refaire votre inscription.",
            )
            .with("type", "provider_rejected"),
        }
    }
}

/// What a recipient reads, whatever the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Content {
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

impl Content {
    fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            data: HashMap::new(),
        }
    }

    fn with(mut self, key: &str, value: &str) -> Self {
        self.data.insert(key.to_string(), value.to_string());
        self
    }
}

#[derive(Debug)]
pub enum Error {
    NotSent,
    InvalidNotification,
}

pub type Result<T> = std::result::Result<T, Error>;

pub async fn send(ctx: Arc<Context>, notification: Notification, backend: Backend) -> Result<()> {
    match backend {
        Backend::Email => email::send(ctx, notification).await,
        Backend::Push => push::send(ctx, notification).await,
        Backend::Realtime => realtime::send(ctx, notification).await,
    }
}

/// Fires the notification on every backend in the background. Failures are only logged.
pub fn dispatch(ctx: Arc<Context>, notification: Notification, backends: &[Backend]) {
    for backend in backends.iter().copied() {
        let ctx = ctx.clone();
        let notification = notification.clone();

        tokio::spawn(async move {
            if let Err(err) = send(ctx, notification, backend).await {
                tracing::warn!("{:?} notification was not delivered: {:?}", backend, err);
            }
        });
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::modules::order::repository::JobStatus;
    use bigdecimal::BigDecimal;

    pub fn job(client_id: &str, provider_id: Option<&str>) -> Job {
        Job {
            id: "job-1".to_string(),
            client_id: client_id.to_string(),
            provider_id: provider_id.map(str::to_string),
            service_item_id: 1,
            status: JobStatus::Pending,
            price: BigDecimal::from(150),
            address: "12 rue des Lilas".to_string(),
            lat: 33.5731,
            lng: -7.5898,
            distance_km: Some(1.2),
            scheduled_at: None,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn job_notifications_target_the_right_party() {
        let job = job("client-1", Some("provider-1"));

        assert_eq!(
            Notification::job_assigned(job.clone(), "Débouchage".to_string()).recipient_id(),
            Some("provider-1".to_string())
        );
        assert_eq!(
            Notification::provider_arrived(job.clone()).recipient_id(),
            Some("client-1".to_string())
        );
        assert_eq!(
            Notification::job_status_changed(job, "client-1".to_string()).recipient_id(),
            Some("client-1".to_string())
        );
    }

    #[test]
    fn unassigned_jobs_have_no_recipient() {
        let notification = Notification::job_assigned(job("client-1", None), "Ménage".to_string());
        assert_eq!(notification.recipient_id(), None);
    }

    #[test]
    fn push_content_carries_the_job_id() {
        let content = Notification::job_assigned(
            job("client-1", Some("provider-1")),
            "Débouchage".to_string(),
        )
        .content();

        assert_eq!(content.body, "Débouchage pour 150 MAD");
        assert_eq!(content.data.get("jobId").map(String::as_str), Some("job-1"));
        assert_eq!(content.data.get("type").map(String::as_str), Some("job_assigned"));
    }
}
