use async_trait::async_trait;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for the authentication domain service.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command with email, username, full name, and password
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `Hashing` - Password hashing failed; the store is not touched
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password are deliberately indistinguishable,
    /// in both the returned error and the work performed.
    ///
    /// # Arguments
    /// * `email` - Submitted email address
    /// * `password` - Submitted plaintext password
    ///
    /// # Returns
    /// Signed token string whose subject is the user's ID
    ///
    /// # Errors
    /// * `InvalidCredentials` - No such account or wrong password
    /// * `TokenIssuance` - Token signing failed
    /// * `DatabaseError` - Store operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<String, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// User entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// Must be atomic with respect to the uniqueness constraints on email
    /// and username: of two racing creates with the same email, exactly one
    /// succeeds.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Arguments
    /// * `email` - Email to search for
    ///
    /// # Returns
    /// User if one exists with this email
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Arguments
    /// * `id` - User ID
    ///
    /// # Returns
    /// User if one exists with this ID
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
}
