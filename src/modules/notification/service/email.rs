use super::{Error, Notification, Result};
use crate::{modules::user::repository::User, types::Context};
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

struct SendEmailPayload {
    user: User,
    subject: String,
    body: String,
}

pub async fn send(ctx: Arc<Context>, notification: Notification) -> Result<()> {
    let content = notification.content();

    let user = match notification {
        Notification::EmailVerificationRequested(n) => n.user,
        Notification::ProviderValidated(n) | Notification::ProviderRejected(n) => n.user,
        _ => return Err(Error::InvalidNotification),
    };

    send_email(
        ctx,
        SendEmailPayload {
            user,
            subject: content.title,
            body: content.body,
        },
    )
    .await
}

async fn send_email(ctx: Arc<Context>, payload: SendEmailPayload) -> Result<()> {
    let Some(smtp) = ctx.mail.smtp.as_ref() else {
        tracing::info!(
            "Mailer not configured, email to {} not sent: {} / {}",
            payload.user.email,
            payload.subject,
            payload.body
        );
        return Ok(());
    };

    let from = ctx.mail.sender.parse::<Mailbox>().map_err(|err| {
        tracing::error!("Invalid MAIL_SENDER {}: {}", ctx.mail.sender, err);
        Error::NotSent
    })?;

    let to = format!("{} <{}>", payload.user.full_name, payload.user.email)
        .parse::<Mailbox>()
        .map_err(|err| {
            tracing::error!("Invalid recipient {}: {}", payload.user.email, err);
            Error::NotSent
        })?;

    let email = Message::builder()
        .from(from)
        .to(to)
        .subject(payload.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(payload.body)
        .map_err(|err| {
            tracing::error!("Failed to build email: {}", err);
            Error::NotSent
        })?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
        .map_err(|err| {
            tracing::error!("Failed to create SMTP transport for {}: {}", smtp.host, err);
            Error::NotSent
        })?
        .credentials(Credentials::new(smtp.user.clone(), smtp.password.clone()))
        .build();

    transport.send(email).await.map(|_| ()).map_err(|err| {
        tracing::error!("Failed to send email: {}", err);
        Error::NotSent
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::notification::service::test::job;
    use crate::modules::user::repository::{test::user, Role, Status};
    use crate::types::test::context;

    #[tokio::test]
    async fn logs_instead_of_sending_without_a_mailer() {
        let notification = Notification::email_verification_requested(
            user(Role::Client, Status::Active),
            "123456".to_string(),
        );

        assert!(send(context(), notification).await.is_ok());
    }

    #[tokio::test]
    async fn job_events_are_not_emails() {
        let notification = Notification::provider_arrived(job("client-1", Some("provider-1")));

        assert!(matches!(
            send(context(), notification).await,
            Err(Error::InvalidNotification)
        ));
    }
}
