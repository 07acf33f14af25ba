use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Stored instead of a password hash for accounts created through Firebase.
pub const FIREBASE_PASSWORD_SENTINEL: &str = "FIREBASE";

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    EmailTaken,
    StillReferenced,
    UnexpectedError,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "client")]
    Client,
    #[serde(rename = "provider")]
    Provider,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "client",
            Role::Provider => "provider",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "client" => Ok(Role::Client),
            "provider" => Ok(Role::Provider),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("'{}' is not a valid Role", s)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "banned")]
    Banned,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Pending => "pending",
            Status::Banned => "banned",
        }
    }

    /// Providers wait for an admin before becoming bookable.
    pub fn initial_for(role: Role) -> Self {
        match role {
            Role::Provider => Status::Pending,
            _ => Status::Active,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(Status::Active),
            "pending" => Ok(Status::Pending),
            "banned" => Ok(Status::Banned),
            _ => Err(format!("'{}' is not a valid Status", s)),
        }
    }
}

impl TryFrom<String> for Status {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Serialize, Clone, Debug, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[sqlx(try_from = "String")]
    pub status: Status,
    pub email_confirmed: bool,
    pub two_factor_enabled: bool,
    pub firebase_uid: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub rating: BigDecimal,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl User {
    pub fn uses_firebase(&self) -> bool {
        self.password_hash == FIREBASE_PASSWORD_SENTINEL
    }
}

pub fn is_admin(user: &User) -> bool {
    user.role == Role::Admin
}

pub struct CreateUserPayload {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub status: Status,
    pub password_hash: String,
    pub email_confirmed: bool,
    pub firebase_uid: Option<String>,
}

pub async fn create<'e, E>(db: E, payload: CreateUserPayload) -> Result<User>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, User>(
        "
        INSERT INTO users (
            id,
            email,
            full_name,
            role,
            status,
            password_hash,
            email_confirmed,
            firebase_uid
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.email)
    .bind(payload.full_name)
    .bind(payload.role.as_str())
    .bind(payload.status.as_str())
    .bind(payload.password_hash)
    .bind(payload.email_confirmed)
    .bind(payload.firebase_uid)
    .fetch_one(db)
    .await
    .map_err(|err| {
        if err
            .as_database_error()
            .is_some_and(|e| e.is_unique_violation())
        {
            tracing::warn!("Email already registered by a concurrent signup: {}", err);
            return Error::EmailTaken;
        }
        tracing::error!("Error occured while creating a user account: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(&id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(e: E, email: String) -> Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_email: {}", err);
            Error::UnexpectedError
        })
}

pub async fn find_many<'e, E: PgExecutor<'e>>(e: E) -> Result<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
        .fetch_all(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while listing users: {}", err);
            Error::UnexpectedError
        })
}

/// Attaches a Firebase identity to an existing account; Firebase vouches for the email.
pub async fn link_firebase_uid<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    firebase_uid: String,
) -> Result<User> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            firebase_uid = $1,
            email_confirmed = true,
            updated_at = NOW()
        WHERE id = $2
        RETURNING *
        ",
    )
    .bind(firebase_uid)
    .bind(&id)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while linking firebase uid to user {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn confirm_email<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query("UPDATE users SET email_confirmed = true, updated_at = NOW() WHERE id = $1")
        .bind(&id)
        .execute(e)
        .await
        .map(|_| ())
        .map_err(|err| {
            tracing::error!("Error occurred while confirming email of user {}: {}", id, err);
            Error::UnexpectedError
        })
}

pub async fn toggle_two_factor<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<bool>> {
    sqlx::query_scalar::<_, bool>(
        "
        UPDATE users SET
            two_factor_enabled = NOT two_factor_enabled,
            updated_at = NOW()
        WHERE id = $1
        RETURNING two_factor_enabled
        ",
    )
    .bind(&id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while toggling 2FA of user {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub struct UpdateUserPayload {
    pub role: Option<Role>,
    pub status: Option<Status>,
}

pub async fn update_by_id<'e, E: PgExecutor<'e>>(
    e: E,
    id: String,
    payload: UpdateUserPayload,
) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(
        "
        UPDATE users SET
            role = COALESCE($1, role),
            status = COALESCE($2, status),
            updated_at = NOW()
        WHERE id = $3
        RETURNING *
        ",
    )
    .bind(payload.role.map(|role| role.as_str()))
    .bind(payload.status.map(|status| status.as_str()))
    .bind(&id)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while trying to update a user by id {}: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn delete_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<bool> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(&id)
        .execute(e)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            if err
                .as_database_error()
                .is_some_and(|e| e.is_foreign_key_violation())
            {
                tracing::warn!("Refused to delete user {} with jobs or payments", id);
                return Error::StillReferenced;
            }
            tracing::error!("Error occurred while deleting user {}: {}", id, err);
            Error::UnexpectedError
        })
}

#[cfg(test)]
pub mod test {
    use super::*;

    pub fn user(role: Role, status: Status) -> User {
        User {
            id: Ulid::new().to_string(),
            email: "amina@example.com".to_string(),
            full_name: "Amina Diallo".to_string(),
            role,
            status,
            email_confirmed: true,
            two_factor_enabled: false,
            firebase_uid: None,
            password_hash: String::new(),
            rating: BigDecimal::from(0),
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    /// Inserts a confirmed account; `email` must be unique within the test database.
    pub async fn insert(pool: &sqlx::PgPool, email: &str, role: Role, status: Status) -> User {
        create(
            pool,
            CreateUserPayload {
                email: email.to_string(),
                full_name: "Amina Diallo".to_string(),
                role,
                status,
                password_hash: String::new(),
                email_confirmed: true,
                firebase_uid: None,
            },
        )
        .await
        .expect("insert user")
    }

    #[test]
    fn providers_start_pending() {
        assert_eq!(Status::initial_for(Role::Provider), Status::Pending);
        assert_eq!(Status::initial_for(Role::Client), Status::Active);
        assert_eq!(Status::initial_for(Role::Admin), Status::Active);
    }

    #[test]
    fn role_round_trips_through_its_column_value() {
        for role in [Role::Client, Role::Provider, Role::Admin] {
            assert_eq!(Role::try_from(role.to_string()), Ok(role));
        }
        assert!(Role::try_from("superuser".to_string()).is_err());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn duplicate_email_is_reported_as_taken(pool: sqlx::PgPool) {
        insert(&pool, "dup@example.com", Role::Client, Status::Active).await;

        let second = create(
            &pool,
            CreateUserPayload {
                email: "dup@example.com".to_string(),
                full_name: "Second Signup".to_string(),
                role: Role::Client,
                status: Status::Active,
                password_hash: String::new(),
                email_confirmed: false,
                firebase_uid: None,
            },
        )
        .await;

        assert!(matches!(second, Err(Error::EmailTaken)));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn users_without_history_can_be_deleted(pool: sqlx::PgPool) {
        let user = insert(&pool, "fresh@example.com", Role::Client, Status::Active).await;

        assert!(matches!(delete_by_id(&pool, user.id.clone()).await, Ok(true)));
        assert!(matches!(delete_by_id(&pool, user.id).await, Ok(false)));
    }
}
