use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;
use crate::domain::user::validation::LoginInput;
use crate::domain::user::validation::RegistrationInput;

/// Domain service implementation for account operations.
///
/// Validation always runs first, so malformed input never reaches the
/// store, the hasher, or the token issuer. Argon2 work is moved onto the
/// blocking pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account store
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn verify_and_issue(
        &self,
        password: Password,
        user: &User,
    ) -> Result<AccessToken, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let digest = user.password_hash.clone();
        let email = user.email.to_string();

        let outcome = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &digest, &email)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        match outcome {
            Ok(result) => Ok(AccessToken(result.access_token)),
            Err(AuthenticationError::InvalidCredentials) => Err(UserError::PasswordMismatch),
            Err(AuthenticationError::PasswordError(e)) => Err(e.into()),
            Err(AuthenticationError::TokenError(e)) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, input: RegistrationInput) -> Result<User, UserError> {
        let command = input.validate()?;

        // The store's unique index is the backstop if a concurrent
        // registration slips in between this check and the insert.
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            tracing::info!("Registration rejected: email already registered");
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, input: LoginInput) -> Result<AccessToken, UserError> {
        let command = input.validate()?;

        let user = self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .ok_or_else(|| UserError::UnknownEmail(command.email.to_string()))?;

        let token = self.verify_and_issue(command.password, &user).await;
        match &token {
            Ok(_) => tracing::info!(user_id = %user.id, "User logged in"),
            Err(UserError::PasswordMismatch) => {
                tracing::info!(user_id = %user.id, "Login rejected: password mismatch")
            }
            Err(_) => {}
        }

        token
    }

    async fn profile(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFound(email.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        let users = self.repository.list_all().await?;

        if users.is_empty() {
            return Err(UserError::NoUsers);
        }

        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::errors::Field;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::PersonName;
    use crate::domain::user::models::Username;
    use crate::domain::user::ports::MockUserRepository;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
    const PASSWORD: &str = "Str0ng!Pass";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, None))
    }

    fn service(repository: MockUserRepository) -> UserService<MockUserRepository> {
        UserService::new(Arc::new(repository), authenticator())
    }

    fn registration() -> RegistrationInput {
        RegistrationInput {
            username: "alice_01".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            email: "alice@example.com".to_string(),
            password: PASSWORD.to_string(),
        }
    }

    fn login(password: &str) -> LoginInput {
        LoginInput {
            email: "alice@example.com".to_string(),
            password: password.to_string(),
        }
    }

    fn stored_user() -> User {
        User {
            id: UserId::new(),
            username: Username::new("alice_01".to_string()).unwrap(),
            first_name: PersonName::new("Alice".to_string()).unwrap(),
            last_name: PersonName::new("Liddell".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: authenticator().hash_password(PASSWORD).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success_stores_digest() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .withf(|user| user.password_hash != PASSWORD && user.password_hash.starts_with("$argon2id$"))
            .returning(Ok);

        let user = service(repository)
            .register(registration())
            .await
            .expect("registration should succeed");

        assert_eq!(user.email.as_str(), "alice@example.com");
        assert!(authenticator()
            .authenticate(PASSWORD, &user.password_hash, "alice@example.com")
            .is_ok());
    }

    #[tokio::test]
    async fn test_register_weak_password_never_touches_store() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_email().never();
        repository.expect_create().never();

        let result = service(repository)
            .register(RegistrationInput {
                password: "weak".to_string(),
                ..registration()
            })
            .await;

        match result {
            Err(UserError::Validation(errors)) => {
                assert!(errors.violations().iter().all(|v| v.field == Field::Password))
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_any_single_rule_failure_never_inserts() {
        let invalid_inputs = vec![
            RegistrationInput {
                username: "a$".to_string(),
                ..registration()
            },
            RegistrationInput {
                first_name: "Al".to_string(),
                ..registration()
            },
            RegistrationInput {
                last_name: "x".repeat(21),
                ..registration()
            },
            RegistrationInput {
                email: "alice".to_string(),
                ..registration()
            },
            RegistrationInput {
                password: "NoDigits!!".to_string(),
                ..registration()
            },
        ];

        for input in invalid_inputs {
            let mut repository = MockUserRepository::new();
            repository.expect_find_by_email().never();
            repository.expect_create().never();

            let result = service(repository).register(input).await;
            assert!(matches!(result, Err(UserError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let existing = stored_user();
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().never();

        let result = service(repository).register(registration()).await;

        assert!(matches!(
            result,
            Err(UserError::EmailAlreadyExists(email)) if email == "alice@example.com"
        ));
    }

    #[tokio::test]
    async fn test_register_store_failure_is_propagated() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let result = service(repository).register(registration()).await;

        assert!(matches!(result, Err(UserError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_email() {
        let existing = stored_user();
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let token = service(repository)
            .login(login(PASSWORD))
            .await
            .expect("login should succeed");

        let claims = authenticator().validate_token(token.as_str()).unwrap();
        assert_eq!(claims.email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let existing = stored_user();
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let result = service(repository).login(login("Wr0ng!Pass")).await;

        assert!(matches!(result, Err(UserError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));

        let result = service(repository).login(login(PASSWORD)).await;

        assert!(matches!(result, Err(UserError::UnknownEmail(_))));
    }

    #[tokio::test]
    async fn test_login_invalid_payload_never_touches_store() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_email().never();

        let result = service(repository).login(login("short")).await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_corrupt_digest_is_internal_error() {
        let mut existing = stored_user();
        existing.password_hash = "not-a-digest".to_string();
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let result = service(repository).login(login(PASSWORD)).await;

        assert!(matches!(result, Err(UserError::Password(_))));
    }

    #[tokio::test]
    async fn test_profile_not_found() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_email().returning(|_| Ok(None));

        let result = service(repository).profile("ghost@example.com").await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_users_empty_store() {
        let mut repository = MockUserRepository::new();
        repository.expect_list_all().returning(|| Ok(Vec::new()));

        let result = service(repository).list_users().await;

        assert!(matches!(result, Err(UserError::NoUsers)));
    }

    #[tokio::test]
    async fn test_list_users() {
        let existing = stored_user();
        let mut repository = MockUserRepository::new();
        repository
            .expect_list_all()
            .returning(move || Ok(vec![existing.clone()]));

        let users = service(repository).list_users().await.unwrap();

        assert_eq!(users.len(), 1);
    }
}
