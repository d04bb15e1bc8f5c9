use async_trait::async_trait;
use reqwest::Response;

use crate::error::GatewayError;

/// Turns non-success statuses into [`GatewayError::Status`].
#[async_trait]
pub(crate) trait ResponseExt {
    async fn check_success(self, url: &str) -> Result<Self, GatewayError>
    where
        Self: Sized;
}

#[async_trait]
impl ResponseExt for Response {
    async fn check_success(self, url: &str) -> Result<Self, GatewayError> {
        let status = self.status();
        if status.is_success() {
            return Ok(self);
        }
        let body = self
            .text()
            .await
            .unwrap_or_else(|_| "failed to read response text".to_string());
        Err(GatewayError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
