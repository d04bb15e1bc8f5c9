use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::{http::ResponseExt, interpret_registration, interpret_reservation, CourtApi, Reply};
use crate::{
    config::AppConfig,
    error::GatewayError,
    models::{NewPlayer, Reservation, ReservationPayload},
};

/// [`CourtApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpCourtApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCourtApi {
    /// Client for the service rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Client configured from [`AppConfig`].
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.request_timeout())
    }

    /// Base URL every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| GatewayError::Request {
                url: url.clone(),
                source,
            })?
            .check_success(&url)
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|err| GatewayError::Decode {
                url,
                reason: err.to_string(),
            })
    }

    async fn post_json<B>(&self, path: &str, body: &B) -> Result<Vec<u8>, GatewayError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| GatewayError::Request {
                url: url.clone(),
                source,
            })?
            .check_success(&url)
            .await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| GatewayError::Decode {
                url,
                reason: err.to_string(),
            })?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl CourtApi for HttpCourtApi {
    async fn register_player(&self, player: &NewPlayer) -> Result<Reply, GatewayError> {
        let body = self.post_json("/register", player).await?;
        Ok(interpret_registration(&body))
    }

    async fn list_courts(&self) -> Result<Vec<String>, GatewayError> {
        self.get_json("/court/courts").await
    }

    async fn list_turn_slots(&self) -> Result<Vec<String>, GatewayError> {
        self.get_json("/turn/turns").await
    }

    async fn list_player_names(&self) -> Result<Vec<String>, GatewayError> {
        self.get_json("/register/names").await
    }

    async fn create_reservation(
        &self,
        reservation: &ReservationPayload,
    ) -> Result<Reply, GatewayError> {
        let body = self.post_json("/court-reserves", reservation).await?;
        Ok(interpret_reservation(&body))
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, GatewayError> {
        self.get_json("/court-reserves").await
    }
}
