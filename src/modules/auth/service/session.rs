use super::jwt::{self, TokenRole};
use crate::{
    modules::{
        provider,
        user::repository::{Role, Status, User},
    },
    types::Context,
};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    EmailNotVerified,
    Banned,
    AccountPending,
    UnexpectedError,
}

pub struct Session {
    pub token: String,
    pub role: TokenRole,
    pub full_name: String,
}

/// Which token a user may receive once their credentials have been checked.
pub fn token_role(user: &User, onboarding_completed: bool) -> Result<TokenRole, Error> {
    if !user.email_confirmed {
        return Err(Error::EmailNotVerified);
    }

    match (user.role, user.status) {
        (_, Status::Banned) => Err(Error::Banned),
        (Role::Provider, Status::Pending) if !onboarding_completed => {
            Ok(TokenRole::ProviderPendingOnboarding)
        }
        (Role::Provider, Status::Pending) => Err(Error::AccountPending),
        (role, _) => Ok(TokenRole::from(role)),
    }
}

pub async fn open(ctx: &Context, user: &User) -> Result<Session, Error> {
    let onboarding_completed = match user.role {
        Role::Provider => provider::repository::find_profile(&ctx.db_conn.pool, user.id.clone())
            .await
            .map_err(|_| Error::UnexpectedError)?
            .map(|profile| profile.is_onboarding_completed)
            .unwrap_or(false),
        _ => false,
    };

    let role = token_role(user, onboarding_completed)?;
    let token = jwt::issue(&ctx.jwt, user, role).map_err(|_| Error::UnexpectedError)?;

    tracing::info!("Issued {} token for user {}", role.as_str(), user.id);

    Ok(Session {
        token,
        role,
        full_name: user.full_name.clone(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::modules::user::repository;

    #[test]
    fn unconfirmed_email_is_rejected_first() {
        let mut user = repository::test::user(Role::Client, Status::Banned);
        user.email_confirmed = false;

        assert_eq!(token_role(&user, false), Err(Error::EmailNotVerified));
    }

    #[test]
    fn banned_users_get_no_token() {
        let user = repository::test::user(Role::Provider, Status::Banned);
        assert_eq!(token_role(&user, true), Err(Error::Banned));
    }

    #[test]
    fn pending_providers_depend_on_onboarding() {
        let user = repository::test::user(Role::Provider, Status::Pending);

        assert_eq!(
            token_role(&user, false),
            Ok(TokenRole::ProviderPendingOnboarding)
        );
        assert_eq!(token_role(&user, true), Err(Error::AccountPending));
    }

    #[test]
    fn active_users_get_their_own_role() {
        let provider = repository::test::user(Role::Provider, Status::Active);
        let admin = repository::test::user(Role::Admin, Status::Active);
        let client = repository::test::user(Role::Client, Status::Active);

        assert_eq!(token_role(&provider, false), Ok(TokenRole::Provider));
        assert_eq!(token_role(&admin, false), Ok(TokenRole::Admin));
        assert_eq!(token_role(&client, false), Ok(TokenRole::Client));
    }
}
