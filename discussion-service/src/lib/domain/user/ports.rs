use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create a new account: hash the password and persist atomically.
    ///
    /// # Errors
    /// * `DuplicateEmailOrPhone` - Email or phone number is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Verify an email/password pair against the stored credential hash.
    ///
    /// Unknown email and password mismatch are indistinguishable: both fail
    /// with `InvalidCredentials`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such account or password does not match
    /// * `DatabaseError` - Database operation failed
    async fn authenticate_user(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Update existing user with optional fields.
    ///
    /// A provided password is re-hashed through the signup hasher.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DuplicateEmailOrPhone` - New email or phone is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
///
/// Atomicity of creation and the (email, phone) uniqueness pair are the
/// store's responsibility; the domain never read-checks before writing.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `DuplicateEmailOrPhone` - Email or phone uniqueness violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Update existing user in storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DuplicateEmailOrPhone` - New email or phone uniqueness violated
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;
}
