use crate::modules::order::repository::JobStatus;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use sqlx::{FromRow, PgExecutor};

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProviderProfile {
    pub user_id: String,
    pub is_available: bool,
    pub last_lat: Option<f64>,
    pub last_lng: Option<f64>,
    pub radius_km: i32,
    pub price_per_km: BigDecimal,
    pub monthly_revenue_goal: BigDecimal,
    pub zones: String,
    pub bio: Option<String>,
    pub interview_date: Option<String>,
    pub cv_url: Option<String>,
    pub photo_url: Option<String>,
    pub is_onboarding_completed: bool,
    pub schedule: Value,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl ProviderProfile {
    pub fn position(&self) -> Option<(f64, f64)> {
        self.last_lat.zip(self.last_lng)
    }
}

pub struct CreateProfilePayload {
    pub user_id: String,
    pub zones: String,
    pub cv_url: Option<String>,
    pub photo_url: Option<String>,
}

pub async fn create_profile<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateProfilePayload,
) -> Result<ProviderProfile> {
    sqlx::query_as::<_, ProviderProfile>(
        "
        INSERT INTO provider_profiles (
            user_id,
            zones,
            cv_url,
            photo_url
        )
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(payload.user_id)
    .bind(payload.zones)
    .bind(payload.cv_url)
    .bind(payload.photo_url)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating a provider profile: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_profile<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<Option<ProviderProfile>> {
    sqlx::query_as::<_, ProviderProfile>("SELECT * FROM provider_profiles WHERE user_id = $1")
        .bind(&user_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching provider profile {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
}

/// Returns the profile, creating an empty one first if the provider has none yet.
pub async fn find_or_create_profile<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
) -> Result<ProviderProfile> {
    sqlx::query_as::<_, ProviderProfile>(
        "
        INSERT INTO provider_profiles (user_id)
        VALUES ($1)
        ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING *
        ",
    )
    .bind(&user_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while ensuring provider profile {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_availability<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    is_available: bool,
    position: Option<(f64, f64)>,
) -> Result<ProviderProfile> {
    sqlx::query_as::<_, ProviderProfile>(
        "
        UPDATE provider_profiles SET
            is_available = $1,
            last_lat = COALESCE($2, last_lat),
            last_lng = COALESCE($3, last_lng),
            updated_at = NOW()
        WHERE user_id = $4
        RETURNING *
        ",
    )
    .bind(is_available)
    .bind(position.map(|(lat, _)| lat))
    .bind(position.map(|(_, lng)| lng))
    .bind(&user_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while updating availability of provider {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn update_schedule<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    schedule: Value,
) -> Result<()> {
    sqlx::query("UPDATE provider_profiles SET schedule = $1, updated_at = NOW() WHERE user_id = $2")
        .bind(schedule)
        .bind(&user_id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while updating schedule of provider {}: {}",
                user_id,
                err
            );
            Error::UnexpectedError
        })
}

pub struct CompleteOnboardingPayload {
    pub bio: String,
    pub interview_date: Option<String>,
    pub cv_url: Option<String>,
    pub photo_url: Option<String>,
}

pub async fn complete_onboarding<'e, E: PgExecutor<'e>>(
    e: E,
    user_id: String,
    payload: CompleteOnboardingPayload,
) -> Result<ProviderProfile> {
    sqlx::query_as::<_, ProviderProfile>(
        "
        UPDATE provider_profiles SET
            bio = $1,
            interview_date = $2,
            cv_url = COALESCE($3, cv_url),
            photo_url = COALESCE($4, photo_url),
            is_onboarding_completed = true,
            updated_at = NOW()
        WHERE user_id = $5
        RETURNING *
        ",
    )
    .bind(payload.bio)
    .bind(payload.interview_date)
    .bind(payload.cv_url)
    .bind(payload.photo_url)
    .bind(&user_id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while completing onboarding of provider {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn reset_onboarding<'e, E: PgExecutor<'e>>(e: E, user_id: String) -> Result<()> {
    sqlx::query(
        "
        UPDATE provider_profiles SET
            is_onboarding_completed = false,
            updated_at = NOW()
        WHERE user_id = $1
        ",
    )
    .bind(&user_id)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while resetting onboarding of provider {}: {}",
            user_id,
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProviderServiceEntry {
    pub item_id: i32,
    pub name: String,
    pub icon: String,
    pub base_price: BigDecimal,
    pub is_active: bool,
}

pub async fn find_active_services<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
) -> Result<Vec<ProviderServiceEntry>> {
    sqlx::query_as::<_, ProviderServiceEntry>(
        "
        SELECT
            provider_services.service_item_id AS item_id,
            service_items.name,
            service_items.icon,
            provider_services.base_price,
            provider_services.is_active
        FROM provider_services
        INNER JOIN service_items ON service_items.id = provider_services.service_item_id
        WHERE provider_services.provider_user_id = $1
            AND provider_services.is_active = true
        ORDER BY service_items.name
        ",
    )
    .bind(&provider_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching services of provider {}: {}",
            provider_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn clear_services<'e, E: PgExecutor<'e>>(e: E, provider_id: String) -> Result<()> {
    sqlx::query("DELETE FROM provider_services WHERE provider_user_id = $1")
        .bind(&provider_id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!(
                "Error occurred while clearing services of provider {}: {}",
                provider_id,
                err
            );
            Error::UnexpectedError
        })
}

/// Adds the given catalog items at their base price. Returns how many rows were added.
pub async fn add_services_at_base_price<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
    item_ids: Vec<i32>,
) -> Result<u64> {
    sqlx::query(
        "
        INSERT INTO provider_services (provider_user_id, service_item_id, base_price, is_active)
        SELECT $1, service_items.id, service_items.base_price, true
        FROM service_items
        WHERE service_items.id = ANY($2)
        ON CONFLICT (provider_user_id, service_item_id) DO NOTHING
        ",
    )
    .bind(&provider_id)
    .bind(item_ids)
    .execute(e)
    .await
    .map(|result| result.rows_affected())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while adding services to provider {}: {}",
            provider_id,
            err
        );
        Error::UnexpectedError
    })
}

pub struct UpsertServicePayload {
    pub service_item_id: i32,
    pub price: BigDecimal,
    pub is_active: bool,
}

pub async fn upsert_service<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
    payload: UpsertServicePayload,
) -> Result<()> {
    sqlx::query(
        "
        INSERT INTO provider_services (provider_user_id, service_item_id, base_price, is_active)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (provider_user_id, service_item_id)
        DO UPDATE SET base_price = EXCLUDED.base_price, is_active = EXCLUDED.is_active
        ",
    )
    .bind(&provider_id)
    .bind(payload.service_item_id)
    .bind(payload.price)
    .bind(payload.is_active)
    .execute(e)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!(
            "Error occurred while upserting a service of provider {}: {}",
            provider_id,
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Clone, Debug, FromRow)]
pub struct MonthStats {
    pub revenue: BigDecimal,
    pub completed: i64,
}

pub async fn find_month_stats<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
) -> Result<MonthStats> {
    sqlx::query_as::<_, MonthStats>(
        "
        SELECT
            COALESCE(SUM(price), 0) AS revenue,
            COUNT(*) AS completed
        FROM jobs
        WHERE provider_id = $1
            AND status = $2
            AND created_at >= DATE_TRUNC('month', NOW())
        ",
    )
    .bind(&provider_id)
    .bind(i32::from(JobStatus::Completed))
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while computing month stats of provider {}: {}",
            provider_id,
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Clone, Debug, FromRow)]
pub struct ResponseCounts {
    pub accepted: i64,
    pub rejected: i64,
}

impl ResponseCounts {
    /// Percentage of accepted responses, 100 when the provider never responded.
    pub fn acceptance_rate(&self) -> i64 {
        match self.accepted + self.rejected {
            0 => 100,
            total => (self.accepted * 100 + total / 2) / total,
        }
    }
}

pub async fn find_response_counts<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
) -> Result<ResponseCounts> {
    sqlx::query_as::<_, ResponseCounts>(
        "
        SELECT
            COUNT(*) FILTER (WHERE status = ANY($2)) AS accepted,
            COUNT(*) FILTER (WHERE status = $3) AS rejected
        FROM jobs
        WHERE provider_id = $1
        ",
    )
    .bind(&provider_id)
    .bind(
        [
            JobStatus::Assigned,
            JobStatus::Confirmed,
            JobStatus::InProgress,
            JobStatus::Completed,
        ]
        .into_iter()
        .map(i32::from)
        .collect::<Vec<_>>(),
    )
    .bind(i32::from(JobStatus::Rejected))
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while counting responses of provider {}: {}",
            provider_id,
            err
        );
        Error::UnexpectedError
    })
}

/// A provider able to take a job for a given service.
#[derive(Clone, Debug, FromRow)]
pub struct Candidate {
    pub user_id: String,
    pub last_lat: Option<f64>,
    pub last_lng: Option<f64>,
}

impl Candidate {
    pub fn position(&self) -> Option<(f64, f64)> {
        self.last_lat.zip(self.last_lng)
    }
}

pub async fn find_offering_provider<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
    service_item_id: i32,
) -> Result<Option<Candidate>> {
    sqlx::query_as::<_, Candidate>(
        "
        SELECT provider_profiles.user_id, provider_profiles.last_lat, provider_profiles.last_lng
        FROM provider_profiles
        INNER JOIN users ON users.id = provider_profiles.user_id
        INNER JOIN provider_services
            ON provider_services.provider_user_id = provider_profiles.user_id
        WHERE provider_profiles.user_id = $1
            AND provider_services.service_item_id = $2
            AND provider_services.is_active = true
            AND users.status = 'active'
        ",
    )
    .bind(&provider_id)
    .bind(service_item_id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while checking provider {} for service {}: {}",
            provider_id,
            service_item_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_available_candidates<'e, E: PgExecutor<'e>>(
    e: E,
    service_item_id: i32,
) -> Result<Vec<Candidate>> {
    sqlx::query_as::<_, Candidate>(
        "
        SELECT provider_profiles.user_id, provider_profiles.last_lat, provider_profiles.last_lng
        FROM provider_profiles
        INNER JOIN users ON users.id = provider_profiles.user_id
        INNER JOIN provider_services
            ON provider_services.provider_user_id = provider_profiles.user_id
        WHERE provider_services.service_item_id = $1
            AND provider_services.is_active = true
            AND provider_profiles.is_available = true
            AND provider_profiles.last_lat IS NOT NULL
            AND provider_profiles.last_lng IS NOT NULL
            AND users.status = 'active'
        ",
    )
    .bind(service_item_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching candidates for service {}: {}",
            service_item_id,
            err
        );
        Error::UnexpectedError
    })
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::modules::user::repository::{self as user_repository, Role, Status, User};

    /// An active, available provider offering `item_id` from `position`.
    pub async fn bookable(
        pool: &sqlx::PgPool,
        email: &str,
        item_id: i32,
        position: (f64, f64),
    ) -> User {
        let user = user_repository::test::insert(pool, email, Role::Provider, Status::Active).await;
        create_profile(
            pool,
            CreateProfilePayload {
                user_id: user.id.clone(),
                zones: "General".to_string(),
                cv_url: None,
                photo_url: None,
            },
        )
        .await
        .unwrap();
        add_services_at_base_price(pool, user.id.clone(), vec![item_id])
            .await
            .unwrap();
        update_availability(pool, user.id.clone(), true, Some(position))
            .await
            .unwrap();
        user
    }

    #[test]
    fn acceptance_rate_defaults_to_full_marks() {
        let counts = ResponseCounts {
            accepted: 0,
            rejected: 0,
        };
        assert_eq!(counts.acceptance_rate(), 100);
    }

    #[test]
    fn acceptance_rate_rounds_to_nearest_percent() {
        let counts = ResponseCounts {
            accepted: 2,
            rejected: 1,
        };
        assert_eq!(counts.acceptance_rate(), 67);

        let counts = ResponseCounts {
            accepted: 19,
            rejected: 1,
        };
        assert_eq!(counts.acceptance_rate(), 95);
    }
}
