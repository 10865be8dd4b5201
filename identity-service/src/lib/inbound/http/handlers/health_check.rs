use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn health_check() -> ApiSuccess<HealthCheckResponseData> {
    ApiSuccess::new(StatusCode::OK, HealthCheckResponseData { status: "ok" })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckResponseData {
    pub status: &'static str,
}
