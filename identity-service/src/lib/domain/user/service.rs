use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and login.
///
/// Stateless per request: hashing and signing are synchronous CPU-bound
/// calls, and the repository provides the only concurrency control needed.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    token_issuer: Arc<TokenIssuer>,
    password_hasher: PasswordHasher,
    fallback_hash: String,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// Hashes a fixed placeholder once so that logins against unknown
    /// emails still pay for one password verification; without it the
    /// absent-account path would return measurably faster and leak which
    /// emails are registered.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `token_issuer` - Signed token issuance
    ///
    /// # Errors
    /// * `Hashing` - Computing the fallback hash failed
    pub fn new(repository: Arc<UR>, token_issuer: Arc<TokenIssuer>) -> Result<Self, UserError> {
        let password_hasher = PasswordHasher::new();
        let fallback_hash = password_hasher.hash("fallback-credential-placeholder")?;

        Ok(Self {
            repository,
            token_issuer,
            password_hasher,
            fallback_hash,
        })
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        // Hash before touching the store; a failure here has no side effects.
        let password_hash = self
            .password_hasher
            .hash(command.password.as_str())
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing failed");
                UserError::from(e)
            })?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            full_name: command.full_name,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.create(user).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<String, UserError> {
        let user = self.repository.find_by_email(email).await?;

        let verified = match &user {
            Some(user) => self.password_hasher.verify(password, &user.password_hash),
            None => {
                // Burn one verification against the fallback hash so this
                // path costs the same as a wrong password.
                self.password_hasher.verify(password, &self.fallback_hash);
                false
            }
        };

        let user = match (user, verified) {
            (Some(user), true) => user,
            _ => return Err(UserError::InvalidCredentials),
        };

        let token = self
            .token_issuer
            .issue(&user.id.to_string(), Utc::now())
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %user.id, "Token issuance failed");
                UserError::from(e)
            })?;

        Ok(token)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::FullName;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::Username;

    const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
        }
    }

    fn test_issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(TEST_SECRET, Duration::days(30)).unwrap())
    }

    fn register_command() -> RegisterUserCommand {
        RegisterUserCommand::new(
            Username::new("testuser".to_string()).unwrap(),
            EmailAddress::new("test@example.com".to_string()).unwrap(),
            FullName::new("Test User".to_string()).unwrap(),
            Password::new("password123".to_string()).unwrap(),
        )
    }

    fn stored_user(email: &str, password: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            full_name: FullName::new("Test User".to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.username.as_str() == "testuser"
                    && user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "password123"
            })
            .times(1)
            .returning(|user| Ok(user));

        let service = AuthService::new(Arc::new(repository), test_issuer()).unwrap();

        let user = service.register(register_command()).await.unwrap();
        assert_eq!(user.username.as_str(), "testuser");
        assert_eq!(user.full_name.as_str(), "Test User");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = AuthService::new(Arc::new(repository), test_issuer()).unwrap();

        let result = service.register(register_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ))
        });

        let service = AuthService::new(Arc::new(repository), test_issuer()).unwrap();

        let result = service.register(register_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::UsernameAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_success_binds_subject() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("test@example.com", "password123");
        let user_id = user.id;
        repository
            .expect_find_by_email()
            .with(eq("test@example.com"))
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let issuer = test_issuer();
        let service = AuthService::new(Arc::new(repository), Arc::clone(&issuer)).unwrap();

        let token = service
            .authenticate("test@example.com", "password123")
            .await
            .unwrap();
        assert!(!token.is_empty());

        let subject = issuer.verify(&token, Utc::now()).unwrap();
        assert_eq!(subject, user_id.to_string());
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("test@example.com", "password123");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), test_issuer()).unwrap();

        let result = service.authenticate("test@example.com", "wrongpass").await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), test_issuer()).unwrap();

        let result = service.authenticate("nobody@example.com", "password123").await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_uniform() {
        // Unknown email and wrong password must produce identical errors.
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("known@example.com", "password123");
        repository
            .expect_find_by_email()
            .with(eq("known@example.com"))
            .returning(move |_| Ok(Some(user.clone())));
        repository
            .expect_find_by_email()
            .with(eq("unknown@example.com"))
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), test_issuer()).unwrap();

        let wrong_password = service
            .authenticate("known@example.com", "wrongpass")
            .await
            .unwrap_err();
        let unknown_email = service
            .authenticate("unknown@example.com", "wrongpass")
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.to_string(), "Invalid Email or Password");
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repository = MockTestUserRepository::new();

        let user = stored_user("test@example.com", "password123");
        let user_id = user.id;
        repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), test_issuer()).unwrap();

        let found = service.get_user(&user_id).await.unwrap();
        assert_eq!(found.id, user_id);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), test_issuer()).unwrap();

        let result = service.get_user(&UserId::new()).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
