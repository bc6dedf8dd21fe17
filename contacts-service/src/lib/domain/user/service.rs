use std::sync::Arc;

use async_trait::async_trait;
use auth::password::DUMMY_HASH;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with an injected repository.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .password_hasher
            .hash(&command.password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        // The unique index on email closes the window between the lookup
        // above and this insert; a concurrent duplicate surfaces from the
        // repository as EmailAlreadyExists.
        self.repository.create(user).await
    }

    async fn authenticate(&self, email: &EmailAddress, password: &str) -> Result<User, UserError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            // Same Argon2 cost whether or not the account exists
            let _ = self.password_hasher.verify(password, DUMMY_HASH);
            return Err(UserError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, &user.password_hash) {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &EmailAddress) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFound(email.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;

    mock! {
        Repo {}

        #[async_trait]
        impl UserRepository for Repo {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &EmailAddress)
                -> Result<Option<User>, UserError>;
        }
    }

    fn email(s: &str) -> EmailAddress {
        EmailAddress::new(s.to_string()).expect("valid email")
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockRepo::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|user| Ok(user));

        let service = UserService::new(Arc::new(repo));
        let user = service
            .register(RegisterUserCommand::new(
                email("alice@example.com"),
                "pass_word!".to_string(),
            ))
            .await
            .expect("registration failed");

        assert_ne!(user.password_hash, "pass_word!");
        assert!(PasswordHasher::new().verify("pass_word!", &user.password_hash));
    }

    #[tokio::test]
    async fn test_register_rejects_existing_email() {
        let existing = User {
            id: UserId::new(),
            email: email("alice@example.com"),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        };

        let mut repo = MockRepo::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();

        let service = UserService::new(Arc::new(repo));
        let result = service
            .register(RegisterUserCommand::new(
                email("alice@example.com"),
                "pass_word!".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_maps_insert_race_to_duplicate() {
        // Lookup sees nothing, but a concurrent registration wins the insert
        let mut repo = MockRepo::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repo));
        let result = service
            .register(RegisterUserCommand::new(
                email("alice@example.com"),
                "pass_word!".to_string(),
            ))
            .await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let hash = PasswordHasher::new()
            .hash("correct_password")
            .expect("hashing failed");
        let stored = User {
            id: UserId::new(),
            email: email("alice@example.com"),
            password_hash: hash,
            created_at: Utc::now(),
        };
        let stored_id = stored.id;

        let mut repo = MockRepo::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));

        let service = UserService::new(Arc::new(repo));
        let user = service
            .authenticate(&email("alice@example.com"), "correct_password")
            .await
            .expect("authentication failed");

        assert_eq!(user.id, stored_id);
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let hash = PasswordHasher::new()
            .hash("correct_password")
            .expect("hashing failed");
        let stored = User {
            id: UserId::new(),
            email: email("alice@example.com"),
            password_hash: hash,
            created_at: Utc::now(),
        };

        // Known account, wrong password
        let mut repo = MockRepo::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(stored.clone())));
        let service = UserService::new(Arc::new(repo));
        let wrong_password = service
            .authenticate(&email("alice@example.com"), "wrong_password")
            .await;

        // No account at all
        let mut repo = MockRepo::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        let service = UserService::new(Arc::new(repo));
        let unknown_email = service
            .authenticate(&email("nouser@example.com"), "anything")
            .await;

        assert!(matches!(wrong_password, Err(UserError::InvalidCredentials)));
        assert!(matches!(unknown_email, Err(UserError::InvalidCredentials)));
    }
}
