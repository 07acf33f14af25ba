use crate::modules::{order::repository::JobStatus, payment::repository::PAID};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{FromRow, PgExecutor};

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub users: i64,
    pub providers: i64,
    pub pending_providers: i64,
    pub jobs: i64,
    pub revenue: BigDecimal,
}

pub async fn find_totals<'e, E: PgExecutor<'e>>(e: E) -> Result<Totals> {
    sqlx::query_as::<_, Totals>(
        "
        SELECT
            (SELECT COUNT(*) FROM users) AS users,
            (SELECT COUNT(*) FROM users WHERE role = 'provider') AS providers,
            (
                SELECT COUNT(*) FROM users
                WHERE role = 'provider' AND status = 'pending'
            ) AS pending_providers,
            (SELECT COUNT(*) FROM jobs) AS jobs,
            (
                SELECT COALESCE(SUM(amount), 0) FROM payments WHERE status = $1
            ) AS revenue
        ",
    )
    .bind(PAID)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to fetch platform totals: {}", err);
        Error::UnexpectedError
    })
}

/// Something that happened on the platform, as shown in the admin feed.
#[derive(Serialize, Clone, Debug, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub kind: String,
    pub reference_id: String,
    pub title: String,
    pub date: NaiveDateTime,
}

pub async fn find_recent_registrations<'e, E: PgExecutor<'e>>(
    e: E,
    limit: i64,
) -> Result<Vec<ActivityEvent>> {
    sqlx::query_as::<_, ActivityEvent>(
        "
        SELECT
            'registration' AS kind,
            id AS reference_id,
            full_name || ' (' || role || ')' AS title,
            created_at AS date
        FROM users
        ORDER BY created_at DESC
        LIMIT $1
        ",
    )
    .bind(limit)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching recent registrations: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_recent_orders<'e, E: PgExecutor<'e>>(
    e: E,
    limit: i64,
) -> Result<Vec<ActivityEvent>> {
    sqlx::query_as::<_, ActivityEvent>(
        "
        SELECT
            'order' AS kind,
            jobs.id AS reference_id,
            service_items.name || ' - ' || users.full_name AS title,
            jobs.created_at AS date
        FROM jobs
        INNER JOIN service_items ON service_items.id = jobs.service_item_id
        INNER JOIN users ON users.id = jobs.client_id
        ORDER BY jobs.created_at DESC
        LIMIT $1
        ",
    )
    .bind(limit)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching recent orders: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_recent_payments<'e, E: PgExecutor<'e>>(
    e: E,
    limit: i64,
) -> Result<Vec<ActivityEvent>> {
    sqlx::query_as::<_, ActivityEvent>(
        "
        SELECT
            'payment' AS kind,
            payments.id AS reference_id,
            payments.amount::TEXT || ' MAD (' || payments.method || ')' AS title,
            payments.created_at AS date
        FROM payments
        ORDER BY payments.created_at DESC
        LIMIT $1
        ",
    )
    .bind(limit)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching recent payments: {}", err);
        Error::UnexpectedError
    })
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PendingProvider {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub zones: String,
    pub bio: Option<String>,
    pub interview_date: Option<String>,
    pub cv_url: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: NaiveDateTime,
}

pub async fn find_pending_providers<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<PendingProvider>> {
    sqlx::query_as::<_, PendingProvider>(
        "
        SELECT
            users.id AS user_id,
            users.full_name,
            users.email,
            provider_profiles.zones,
            provider_profiles.bio,
            provider_profiles.interview_date,
            provider_profiles.cv_url,
            provider_profiles.photo_url,
            users.created_at
        FROM users
        INNER JOIN provider_profiles ON provider_profiles.user_id = users.id
        WHERE users.role = 'provider'
            AND users.status = 'pending'
            AND provider_profiles.is_onboarding_completed = true
        ORDER BY users.created_at ASC
        ",
    )
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching pending providers: {}", err);
        Error::UnexpectedError
    })
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SelectedService {
    #[serde(skip_serializing)]
    pub provider_id: String,
    pub item_id: i32,
    pub name: String,
    pub base_price: BigDecimal,
}

pub async fn find_selected_services<'e, E: PgExecutor<'e>>(
    e: E,
    provider_ids: Vec<String>,
) -> Result<Vec<SelectedService>> {
    sqlx::query_as::<_, SelectedService>(
        "
        SELECT
            provider_services.provider_user_id AS provider_id,
            service_items.id AS item_id,
            service_items.name,
            provider_services.base_price
        FROM provider_services
        INNER JOIN service_items ON service_items.id = provider_services.service_item_id
        WHERE provider_services.provider_user_id = ANY($1)
        ORDER BY service_items.name
        ",
    )
    .bind(provider_ids)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching selected services: {}", err);
        Error::UnexpectedError
    })
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStats {
    pub service_id: i32,
    pub name: String,
    pub category: String,
    pub providers: i64,
    pub jobs: i64,
    pub average_price: Option<BigDecimal>,
}

pub async fn find_service_stats<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<ServiceStats>> {
    sqlx::query_as::<_, ServiceStats>(
        "
        SELECT
            service_items.id AS service_id,
            service_items.name,
            service_categories.name AS category,
            (
                SELECT COUNT(*) FROM provider_services
                WHERE provider_services.service_item_id = service_items.id
                    AND provider_services.is_active = true
            ) AS providers,
            (
                SELECT COUNT(*) FROM jobs
                WHERE jobs.service_item_id = service_items.id
            ) AS jobs,
            (
                SELECT ROUND(AVG(jobs.price), 2) FROM jobs
                WHERE jobs.service_item_id = service_items.id
            ) AS average_price
        FROM service_items
        INNER JOIN service_categories ON service_categories.id = service_items.category_id
        ORDER BY service_items.id
        ",
    )
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while computing service stats: {}", err);
        Error::UnexpectedError
    })
}

/// A paid and completed job, the base of platform commissions.
#[derive(Clone, Debug, FromRow)]
pub struct SettledJob {
    pub job_id: String,
    pub date: NaiveDateTime,
    pub service: String,
    pub provider: Option<String>,
    pub amount: BigDecimal,
}

pub async fn find_settled_jobs<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<SettledJob>> {
    sqlx::query_as::<_, SettledJob>(
        "
        SELECT
            jobs.id AS job_id,
            payments.created_at AS date,
            service_items.name AS service,
            providers.full_name AS provider,
            payments.amount
        FROM payments
        INNER JOIN jobs ON jobs.id = payments.job_id
        INNER JOIN service_items ON service_items.id = jobs.service_item_id
        LEFT JOIN users AS providers ON providers.id = jobs.provider_id
        WHERE payments.status = $1 AND jobs.status = $2
        ORDER BY payments.created_at DESC
        ",
    )
    .bind(PAID)
    .bind(i32::from(JobStatus::Completed))
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching settled jobs: {}", err);
        Error::UnexpectedError
    })
}
