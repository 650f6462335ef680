use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementing the account credential lifecycle.
///
/// Argon2 hashing and verification are CPU-bound, so both run on the tokio
/// blocking pool rather than on the async scheduler.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `password_hasher` - Credential hashing implementation
    pub fn new(repository: Arc<UR>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, UserError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Verification task failed: {}", e)))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            full_name: command.full_name,
            phone_number: command.phone_number,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        // Uniqueness on (email, phone) is enforced by the store; a violation
        // surfaces as DuplicateEmailOrPhone with nothing persisted.
        self.repository.create(user).await
    }

    async fn authenticate_user(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<User, UserError> {
        // Unknown email and wrong password both end in InvalidCredentials;
        // callers cannot tell which happened.
        let Some(user) = self.repository.find_by_email(email.as_str()).await? else {
            return Err(UserError::InvalidCredentials);
        };

        let matches = self
            .verify_password(password.to_string(), user.password_hash.clone())
            .await?;

        if matches {
            Ok(user)
        } else {
            Err(UserError::InvalidCredentials)
        }
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_full_name) = command.full_name {
            user.full_name = new_full_name;
        }

        if let Some(new_phone_number) = command.phone_number {
            user.phone_number = new_phone_number;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(new_password).await?;
        }

        self.repository.update(user).await
    }
}
