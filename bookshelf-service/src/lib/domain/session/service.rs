use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::InvalidReason;
use auth::TokenError;

use crate::domain::session::models::extract_bearer_token;
use crate::domain::session::models::AuthOutcome;
use crate::domain::session::models::AuthenticatedUser;
use crate::domain::session::models::Rejection;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::ports::UserRepository;

/// Resolves a request's bearer token to a live user.
///
/// Stages run strictly in order and the first failure ends the pipeline:
/// extract the token, verify it, look the subject up in the directory.
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn resolve(&self, authorization: Option<&str>) -> Result<AuthenticatedUser, Rejection> {
        let token = extract_bearer_token(authorization).ok_or(Rejection::MissingCredentials)?;

        let verified = self
            .authenticator
            .validate_token(token)
            .map_err(|e| match e {
                TokenError::Invalid(reason) => Rejection::InvalidToken(reason),
                TokenError::Fault(detail) => Rejection::TokenFault(detail),
            })?;

        let user_id = UserId::from_string(&verified.subject)
            .map_err(|_| Rejection::InvalidToken(InvalidReason::MissingSubject))?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| Rejection::DirectoryFault(e.to_string()))?
            .ok_or(Rejection::UnknownSubject(user_id))?;

        Ok(UserProfile::from(user).into())
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, authorization: Option<&str>) -> AuthOutcome {
        match self.resolve(authorization).await {
            Ok(user) => {
                tracing::debug!(user_id = %user.id, "Request authenticated");
                AuthOutcome::Attached(user)
            }
            Err(rejection) => {
                if rejection.is_server_fault() {
                    tracing::error!(?rejection, "Session check failed");
                } else {
                    tracing::warn!(?rejection, "Request rejected");
                }
                AuthOutcome::Rejected(rejection)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::FixedClock;
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserName;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
            async fn count(&self) -> Result<u64, UserError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, Duration::hours(1)))
    }

    fn user() -> User {
        User {
            id: UserId::new(),
            name: UserName::new("A".to_string()).unwrap(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: Utc::now(),
        }
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {}", token)
    }

    #[tokio::test]
    async fn test_missing_header_skips_directory() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = SessionService::new(Arc::new(repository), authenticator());

        assert_eq!(
            service.authenticate(None).await,
            AuthOutcome::Rejected(Rejection::MissingCredentials)
        );
        assert_eq!(
            service.authenticate(Some("Bearer")).await,
            AuthOutcome::Rejected(Rejection::MissingCredentials)
        );
    }

    #[tokio::test]
    async fn test_garbage_token_is_invalid() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let service = SessionService::new(Arc::new(repository), authenticator());

        assert_eq!(
            service.authenticate(Some("Bearer not.a.token")).await,
            AuthOutcome::Rejected(Rejection::InvalidToken(InvalidReason::Malformed))
        );
    }

    #[tokio::test]
    async fn test_expired_token_is_invalid() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let issued_at = Utc::now() - Duration::hours(2);
        let issuer = Authenticator::new(SECRET, Duration::hours(1))
            .with_clock(Arc::new(FixedClock::at(issued_at)));
        let token = issuer.issue_token(UserId::new()).unwrap().token;

        let service = SessionService::new(Arc::new(repository), authenticator());

        assert_eq!(
            service.authenticate(Some(&bearer(&token))).await,
            AuthOutcome::Rejected(Rejection::InvalidToken(InvalidReason::Expired))
        );
    }

    #[tokio::test]
    async fn test_non_uuid_subject_is_invalid() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_id().times(0);

        let auth = authenticator();
        let token = auth.issue_token("not-a-uuid").unwrap().token;

        let service = SessionService::new(Arc::new(repository), auth);

        assert_eq!(
            service.authenticate(Some(&bearer(&token))).await,
            AuthOutcome::Rejected(Rejection::InvalidToken(InvalidReason::MissingSubject))
        );
    }

    #[tokio::test]
    async fn test_deleted_user_is_unknown_subject() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let auth = authenticator();
        let user_id = UserId::new();
        let token = auth.issue_token(user_id).unwrap().token;

        let service = SessionService::new(Arc::new(repository), auth);

        assert_eq!(
            service.authenticate(Some(&bearer(&token))).await,
            AuthOutcome::Rejected(Rejection::UnknownSubject(user_id))
        );
    }

    #[tokio::test]
    async fn test_directory_failure_is_server_fault() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection refused".to_string())));

        let auth = authenticator();
        let token = auth.issue_token(UserId::new()).unwrap().token;

        let service = SessionService::new(Arc::new(repository), auth);

        match service.authenticate(Some(&bearer(&token))).await {
            AuthOutcome::Rejected(rejection) => assert!(rejection.is_server_fault()),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_valid_token_attaches_identity() {
        let existing = user();
        let user_id = existing.id;
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let auth = authenticator();
        let token = auth.issue_token(user_id).unwrap().token;

        let service = SessionService::new(Arc::new(repository), auth);

        match service.authenticate(Some(&bearer(&token))).await {
            AuthOutcome::Attached(identity) => {
                assert_eq!(identity.id, user_id);
                assert_eq!(identity.name.as_str(), "A");
                assert_eq!(identity.email.as_str(), "a@x.com");
            }
            other => panic!("expected attached identity, got {:?}", other),
        }
    }
}
