use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::AccessToken;
use crate::domain::user::models::User;
use crate::domain::user::validation::LoginInput;
use crate::domain::user::validation::RegistrationInput;

/// Port for account domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `input` - Raw registration fields
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `Validation` - Input broke one or more schema rules
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, input: RegistrationInput) -> Result<User, UserError>;

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `input` - Raw login fields
    ///
    /// # Returns
    /// Signed access token bound to the account email
    ///
    /// # Errors
    /// * `Validation` - Input broke one or more schema rules
    /// * `UnknownEmail` - No account with this email
    /// * `PasswordMismatch` - Password does not match the stored digest
    /// * `Password` / `Token` - Verification or signing failed
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, input: LoginInput) -> Result<AccessToken, UserError>;

    /// Retrieve the account an authenticated identity belongs to.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `DatabaseError` - Store operation failed
    async fn profile(&self, email: &str) -> Result<User, UserError>;

    /// Retrieve every registered account.
    ///
    /// # Errors
    /// * `NoUsers` - The store is empty
    /// * `DatabaseError` - Store operation failed
    async fn list_users(&self) -> Result<Vec<User>, UserError>;
}

/// Persistence operations for user aggregate.
///
/// Each operation is a single-document operation; nothing spans a lookup
/// and a following insert.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve all users, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;
}
