use super::types::{request, response};
use crate::{
    modules::provider::{repository, service as provider_service},
    types::Context,
    utils::storage,
};
use std::sync::Arc;

async fn discard_uploads(ctx: &Context, paths: &[Option<&str>]) {
    for path in paths.iter().flatten() {
        storage::remove(&ctx.storage, path).await;
    }
}

async fn persist(
    ctx: &Context,
    user_id: String,
    service_ids: &[i32],
    profile: repository::CompleteOnboardingPayload,
) -> Result<(), response::Error> {
    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to start database transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    repository::find_or_create_profile(&mut *tx, user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToCompleteOnboarding)?;

    repository::clear_services(&mut *tx, user_id.clone())
        .await
        .map_err(|_| response::Error::FailedToCompleteOnboarding)?;

    let added = repository::add_services_at_base_price(&mut *tx, user_id.clone(), service_ids.to_vec())
        .await
        .map_err(|_| response::Error::FailedToCompleteOnboarding)?;

    // some ids are not in the catalog
    if added != service_ids.len() as u64 {
        return Err(response::Error::InvalidServices);
    }

    repository::complete_onboarding(&mut *tx, user_id, profile)
        .await
        .map_err(|_| response::Error::FailedToCompleteOnboarding)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit database transaction: {}", err);
        response::Error::UnexpectedError
    })
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let user_id = payload.auth.user.id;
    let body = payload.body;

    let service_ids = provider_service::parse_service_ids(&body.services).map_err(|err| {
        tracing::warn!("Rejected onboarding services of provider {}: {:?}", user_id, err);
        response::Error::InvalidServices
    })?;

    let cv_url = match body.cv.as_ref() {
        Some(file) => Some(
            storage::save(&ctx.storage, storage::CV_FOLDER, file)
                .await
                .map_err(|_| response::Error::FailedToUploadFile)?,
        ),
        None => None,
    };

    let photo_url = match body.photo.as_ref() {
        Some(file) => match storage::save(&ctx.storage, storage::PHOTO_FOLDER, file).await {
            Ok(path) => Some(path),
            Err(_) => {
                discard_uploads(&ctx, &[cv_url.as_deref()]).await;
                return Err(response::Error::FailedToUploadFile);
            }
        },
        None => None,
    };

    let profile = repository::CompleteOnboardingPayload {
        bio: body.bio.trim().to_string(),
        interview_date: body.interview_date.filter(|date| !date.trim().is_empty()),
        cv_url: cv_url.clone(),
        photo_url: photo_url.clone(),
    };

    if let Err(err) = persist(&ctx, user_id.clone(), &service_ids, profile).await {
        discard_uploads(&ctx, &[cv_url.as_deref(), photo_url.as_deref()]).await;
        return Err(err);
    }

    tracing::info!(
        "Provider {} completed onboarding with {} services",
        user_id,
        service_ids.len()
    );

    Ok(response::Success::OnboardingCompleted)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::{
        auth::middleware::OnboardingAuth,
        user::repository::{test::insert, Role, Status},
    };
    use crate::types::test::context_with_pool;
    use axum_typed_multipart::{FieldData, FieldMetadata};
    use tempfile::NamedTempFile;

    #[sqlx::test(migrations = "./migrations")]
    async fn failed_onboarding_leaves_no_uploaded_file_behind(pool: sqlx::PgPool) {
        let uploads = tempfile::tempdir().unwrap();
        let mut ctx = (*context_with_pool(pool.clone())).clone();
        ctx.storage.uploads_dir = uploads.path().to_path_buf();
        let provider = insert(&pool, "pro@example.com", Role::Provider, Status::Pending).await;

        let mut metadata = FieldMetadata::default();
        metadata.file_name = Some("cv.pdf".to_string());
        let body = request::Body {
            bio: "Plombier depuis 10 ans".to_string(),
            interview_date: None,
            cv: Some(FieldData {
                metadata,
                contents: NamedTempFile::new().unwrap(),
            }),
            photo: None,
            services: "2,999".to_string(),
        };

        let result = service(
            Arc::new(ctx),
            request::Payload {
                body,
                auth: OnboardingAuth { user: provider },
            },
        )
        .await;

        assert!(matches!(result, Err(response::Error::InvalidServices)));
        let leftovers = std::fs::read_dir(uploads.path().join(storage::CV_FOLDER))
            .map(|entries| entries.count())
            .unwrap_or(0);
        assert_eq!(leftovers, 0);
    }
}
