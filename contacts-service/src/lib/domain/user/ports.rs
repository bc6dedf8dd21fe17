use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user with a hashed password.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials for login.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    ///
    /// # Arguments
    /// * `email` - Login email address
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// The authenticated user entity
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such account or password mismatch
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, email: &EmailAddress, password: &str) -> Result<User, UserError>;

    /// Retrieve a user by email address.
    ///
    /// Used by the current-user resolver to map a token subject to a user.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// The storage layer enforces the uniqueness constraint on email; the
/// service's check-then-insert sequence relies on it under concurrency.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email uniqueness constraint violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
}
