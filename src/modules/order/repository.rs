use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, PgExecutor};
use std::fmt;
use ulid::Ulid;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(try_from = "i32", into = "i32")]
pub enum JobStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
    Rejected,
    Confirmed,
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::Assigned => "Assigned",
            JobStatus::InProgress => "InProgress",
            JobStatus::Completed => "Completed",
            JobStatus::Cancelled => "Cancelled",
            JobStatus::Rejected => "Rejected",
            JobStatus::Confirmed => "Confirmed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Cancelled | JobStatus::Rejected
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<JobStatus> for i32 {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Pending => 1,
            JobStatus::Assigned => 2,
            JobStatus::InProgress => 3,
            JobStatus::Completed => 4,
            JobStatus::Cancelled => 5,
            JobStatus::Rejected => 6,
            JobStatus::Confirmed => 7,
        }
    }
}

impl TryFrom<i32> for JobStatus {
    type Error = String;

    fn try_from(code: i32) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(JobStatus::Pending),
            2 => Ok(JobStatus::Assigned),
            3 => Ok(JobStatus::InProgress),
            4 => Ok(JobStatus::Completed),
            5 => Ok(JobStatus::Cancelled),
            6 => Ok(JobStatus::Rejected),
            7 => Ok(JobStatus::Confirmed),
            _ => Err(format!("{} is not a valid job status", code)),
        }
    }
}

fn codes(statuses: &[JobStatus]) -> Vec<i32> {
    statuses.iter().copied().map(i32::from).collect()
}

/// Adds the human readable `status` next to `statusCode` for the mobile client.
pub fn with_status_label<T: Serialize>(row: &T, status: JobStatus) -> Value {
    let mut value = serde_json::to_value(row).unwrap_or(Value::Null);
    if let Value::Object(ref mut fields) = value {
        fields.insert("status".to_string(), Value::from(status.label()));
    }
    value
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub client_id: String,
    pub provider_id: Option<String>,
    pub service_item_id: i32,
    #[sqlx(try_from = "i32")]
    #[serde(rename = "statusCode")]
    pub status: JobStatus,
    pub price: BigDecimal,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub distance_km: Option<f64>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Job {
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.client_id == user_id || self.provider_id.as_deref() == Some(user_id)
    }

    /// The other party of a conversation or transition, if there is one.
    pub fn counterpart_of(&self, user_id: &str) -> Option<String> {
        if self.client_id == user_id {
            self.provider_id.clone()
        } else {
            Some(self.client_id.clone())
        }
    }
}

pub struct CreateJobPayload {
    pub client_id: String,
    pub provider_id: Option<String>,
    pub service_item_id: i32,
    pub price: BigDecimal,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub distance_km: Option<f64>,
    pub scheduled_at: Option<NaiveDateTime>,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateJobPayload) -> Result<Job> {
    sqlx::query_as::<_, Job>(
        "
        INSERT INTO jobs (
            id,
            client_id,
            provider_id,
            service_item_id,
            status,
            price,
            address,
            lat,
            lng,
            distance_km,
            scheduled_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.client_id)
    .bind(payload.provider_id)
    .bind(payload.service_item_id)
    .bind(i32::from(JobStatus::Pending))
    .bind(payload.price)
    .bind(payload.address)
    .bind(payload.lat)
    .bind(payload.lng)
    .bind(payload.distance_km)
    .bind(payload.scheduled_at)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a job: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Job>> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching job {}: {}", id, err);
            Error::UnexpectedError
        })
}

/// Moves a job from `from` to `to`. Returns `None` when the job is no longer in `from`.
pub async fn transition<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    from: JobStatus,
    to: JobStatus,
) -> Result<Option<Job>> {
    sqlx::query_as::<_, Job>(
        "
        UPDATE jobs SET
            status = $1,
            updated_at = NOW()
        WHERE id = $2 AND status = $3
        RETURNING *
        ",
    )
    .bind(i32::from(to))
    .bind(&id)
    .bind(i32::from(from))
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while moving job {} from {} to {}: {}",
            id,
            from,
            to,
            err
        );
        Error::UnexpectedError
    })
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobListItem {
    pub id: String,
    #[sqlx(try_from = "i32")]
    #[serde(rename = "statusCode")]
    pub status: JobStatus,
    pub price: BigDecimal,
    pub address: String,
    pub distance_km: Option<f64>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub service_item_id: i32,
    pub service_name: String,
    pub client_id: String,
    pub client_name: String,
    pub provider_id: Option<String>,
    pub provider_name: Option<String>,
    pub is_paid: bool,
}

impl JobListItem {
    pub fn to_json(&self) -> Value {
        with_status_label(self, self.status)
    }
}

const JOB_LIST_SELECT: &str = "
    SELECT
        jobs.id,
        jobs.status,
        jobs.price,
        jobs.address,
        jobs.distance_km,
        jobs.scheduled_at,
        jobs.created_at,
        jobs.service_item_id,
        service_items.name AS service_name,
        jobs.client_id,
        clients.full_name AS client_name,
        jobs.provider_id,
        providers.full_name AS provider_name,
        EXISTS (
            SELECT 1 FROM payments
            WHERE payments.job_id = jobs.id AND payments.status = 'paid'
        ) AS is_paid
    FROM jobs
    INNER JOIN service_items ON service_items.id = jobs.service_item_id
    INNER JOIN users AS clients ON clients.id = jobs.client_id
    LEFT JOIN users AS providers ON providers.id = jobs.provider_id
";

pub async fn find_many_by_client<'e, E: PgExecutor<'e>>(
    e: E,
    client_id: String,
) -> Result<Vec<JobListItem>> {
    sqlx::query_as::<_, JobListItem>(&format!(
        "{} WHERE jobs.client_id = $1 ORDER BY jobs.created_at DESC",
        JOB_LIST_SELECT
    ))
    .bind(&client_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching jobs of client {}: {}",
            client_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_many_by_provider<'e, E: PgExecutor<'e>>(
    e: E,
    provider_id: String,
    statuses: &[JobStatus],
) -> Result<Vec<JobListItem>> {
    sqlx::query_as::<_, JobListItem>(&format!(
        "{} WHERE jobs.provider_id = $1 AND jobs.status = ANY($2) ORDER BY jobs.created_at DESC",
        JOB_LIST_SELECT
    ))
    .bind(&provider_id)
    .bind(codes(statuses))
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching jobs of provider {}: {}",
            provider_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn find_many<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<JobListItem>> {
    sqlx::query_as::<_, JobListItem>(&format!(
        "{} ORDER BY jobs.created_at DESC",
        JOB_LIST_SELECT
    ))
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while fetching all jobs: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_list_item_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
) -> Result<Option<JobListItem>> {
    sqlx::query_as::<_, JobListItem>(&format!("{} WHERE jobs.id = $1", JOB_LIST_SELECT))
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching job {}: {}", id, err);
            Error::UnexpectedError
        })
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobMessage {
    pub id: String,
    pub job_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

pub struct CreateMessagePayload {
    pub job_id: String,
    pub sender_id: String,
    pub content: String,
}

pub async fn create_message<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateMessagePayload,
) -> Result<JobMessage> {
    sqlx::query_as::<_, JobMessage>(
        "
        WITH inserted AS (
            INSERT INTO job_messages (id, job_id, sender_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
        )
        SELECT
            inserted.id,
            inserted.job_id,
            inserted.sender_id,
            users.full_name AS sender_name,
            inserted.content,
            inserted.created_at
        FROM inserted
        INNER JOIN users ON users.id = inserted.sender_id
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.job_id)
    .bind(payload.sender_id)
    .bind(payload.content)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while trying to create a job message: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_messages<'e, E: PgExecutor<'e>>(
    e: E,
    job_id: String,
) -> Result<Vec<JobMessage>> {
    sqlx::query_as::<_, JobMessage>(
        "
        SELECT
            job_messages.id,
            job_messages.job_id,
            job_messages.sender_id,
            users.full_name AS sender_name,
            job_messages.content,
            job_messages.created_at
        FROM job_messages
        INNER JOIN users ON users.id = job_messages.sender_id
        WHERE job_messages.job_id = $1
        ORDER BY job_messages.created_at ASC
        ",
    )
    .bind(&job_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while fetching messages of job {}: {}",
            job_id,
            err
        );
        Error::UnexpectedError
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_codes_match_the_mobile_client() {
        assert_eq!(i32::from(JobStatus::Pending), 1);
        assert_eq!(i32::from(JobStatus::Confirmed), 7);
        assert_eq!(JobStatus::try_from(3), Ok(JobStatus::InProgress));
        assert!(JobStatus::try_from(8).is_err());
        assert_eq!(serde_json::to_value(JobStatus::Rejected).unwrap(), json!(6));
        assert_eq!(
            serde_json::from_value::<JobStatus>(json!(4)).unwrap(),
            JobStatus::Completed
        );
    }

    #[test]
    fn only_completed_cancelled_and_rejected_are_terminal() {
        let terminal = [
            JobStatus::Pending,
            JobStatus::Assigned,
            JobStatus::InProgress,
            JobStatus::Completed,
            JobStatus::Cancelled,
            JobStatus::Rejected,
            JobStatus::Confirmed,
        ]
        .into_iter()
        .filter(JobStatus::is_terminal)
        .collect::<Vec<_>>();

        assert_eq!(
            terminal,
            vec![JobStatus::Completed, JobStatus::Cancelled, JobStatus::Rejected]
        );
    }

    #[test]
    fn list_items_carry_code_and_label() {
        let item = JobListItem {
            id: "job-1".to_string(),
            status: JobStatus::Assigned,
            price: BigDecimal::from(150),
            address: "12 rue des Lilas".to_string(),
            distance_km: Some(2.5),
            scheduled_at: None,
            created_at: chrono::Utc::now().naive_utc(),
            service_item_id: 1,
            service_name: "Débouchage".to_string(),
            client_id: "client-1".to_string(),
            client_name: "Yasmine".to_string(),
            provider_id: None,
            provider_name: None,
            is_paid: false,
        };

        let value = item.to_json();
        assert_eq!(value["statusCode"], json!(2));
        assert_eq!(value["status"], json!("Assigned"));
        assert_eq!(value["serviceName"], json!("Débouchage"));
    }

    #[test]
    fn counterpart_is_the_other_participant() {
        let job = Job {
            id: "job-1".to_string(),
            client_id: "client-1".to_string(),
            provider_id: Some("provider-1".to_string()),
            service_item_id: 1,
            status: JobStatus::Pending,
            price: BigDecimal::from(100),
            address: "Casablanca".to_string(),
            lat: 33.57,
            lng: -7.58,
            distance_km: None,
            scheduled_at: None,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        };

        assert!(job.is_participant("client-1"));
        assert!(job.is_participant("provider-1"));
        assert!(!job.is_participant("stranger"));
        assert_eq!(job.counterpart_of("client-1"), Some("provider-1".to_string()));
        assert_eq!(job.counterpart_of("provider-1"), Some("client-1".to_string()));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn transition_from_a_stale_status_changes_nothing(pool: sqlx::PgPool) {
        use crate::modules::user::repository::{test::insert, Role, Status};

        let client = insert(&pool, "client@example.com", Role::Client, Status::Active).await;
        let job = create(
            &pool,
            CreateJobPayload {
                client_id: client.id,
                provider_id: None,
                service_item_id: 1,
                price: BigDecimal::from(150),
                address: "12 Rue de la Paix".to_string(),
                lat: 33.57,
                lng: -7.59,
                distance_km: None,
                scheduled_at: None,
            },
        )
        .await
        .unwrap();

        let cancelled = transition(&pool, job.id.clone(), JobStatus::Pending, JobStatus::Cancelled)
            .await
            .unwrap();
        assert_eq!(cancelled.map(|job| job.status), Some(JobStatus::Cancelled));

        let stale = transition(&pool, job.id.clone(), JobStatus::Pending, JobStatus::Assigned)
            .await
            .unwrap();
        assert!(stale.is_none());

        let stored = find_by_id(&pool, job.id).await.unwrap().unwrap();
        assert_eq!(stored.status, JobStatus::Cancelled);
    }
}
