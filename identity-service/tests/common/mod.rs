use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::TokenIssuer;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::Duration;
use http_body_util::BodyExt;
use identity_service::domain::user::models::User;
use identity_service::domain::user::models::UserId;
use identity_service::domain::user::ports::UserRepository;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::user::errors::UserError;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

/// In-memory stand-in for the Postgres repository.
///
/// The mutex makes `create` atomic with respect to the uniqueness checks,
/// matching the guarantee the real store gets from its unique constraints.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|u| u.email.as_str() == user.email.as_str())
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        if users
            .iter()
            .any(|u| u.username.as_str() == user.username.as_str())
        {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }
}

/// Test application driving the router in-process.
pub struct TestApp {
    pub router: Router,
    pub token_issuer: Arc<TokenIssuer>,
}

impl TestApp {
    /// Build the full router over an in-memory repository.
    pub fn spawn() -> Self {
        let token_issuer =
            Arc::new(TokenIssuer::new(TEST_SECRET, Duration::days(30)).unwrap());
        let repository = Arc::new(InMemoryUserRepository::new());
        let auth_service =
            Arc::new(AuthService::new(repository, Arc::clone(&token_issuer)).unwrap());
        let router = create_router(auth_service, Arc::clone(&token_issuer));

        Self {
            router,
            token_issuer,
        }
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        Self::send(self.router.clone(), request).await
    }

    pub async fn get(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = builder.body(Body::empty()).unwrap();

        Self::send(self.router.clone(), request).await
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(request)
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

        (status, body)
    }
}
