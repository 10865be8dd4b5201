use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::get_me::get_me;
use super::handlers::health_check::health_check;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthService;

/// Shared application state.
///
/// Generic over the repository port so tests can run the router against an
/// in-memory store.
pub struct AppState<UR: UserRepository> {
    pub auth_service: Arc<AuthService<UR>>,
    pub token_issuer: Arc<TokenIssuer>,
}

impl<UR: UserRepository> Clone for AppState<UR> {
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            token_issuer: Arc::clone(&self.token_issuer),
        }
    }
}

pub fn create_router<UR: UserRepository>(
    auth_service: Arc<AuthService<UR>>,
    token_issuer: Arc<TokenIssuer>,
) -> Router {
    let state = AppState {
        auth_service,
        token_issuer,
    };

    let public_routes = Router::new()
        .route("/signup", post(register::<UR>))
        .route("/signin", post(authenticate::<UR>))
        .route("/healthCheck", get(health_check));

    let protected_routes = Router::new()
        .route("/api/users/me", get(get_me::<UR>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<UR>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
