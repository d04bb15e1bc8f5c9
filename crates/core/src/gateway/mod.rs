//! Remote data gateway to the reservation service.

mod client;
mod http;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    error::GatewayError,
    models::{NewPlayer, Reservation, ReservationPayload},
};

pub use client::HttpCourtApi;

/// How the service answered a registration or reservation that reached it.
///
/// Both `register_player` and `create_reservation` resolve to a `Reply`;
/// transport failures are reported separately as [`GatewayError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The requested operation happened.
    Accepted,
    /// The service answered but refused the operation.
    Rejected {
        /// Server-supplied explanation, if any.
        message: Option<String>,
    },
}

/// Operations offered by the reservation service. One request each, no retry.
#[async_trait]
pub trait CourtApi: Send + Sync {
    /// `POST /register`.
    async fn register_player(&self, player: &NewPlayer) -> Result<Reply, GatewayError>;

    /// `GET /court/courts`.
    async fn list_courts(&self) -> Result<Vec<String>, GatewayError>;

    /// `GET /turn/turns`.
    async fn list_turn_slots(&self) -> Result<Vec<String>, GatewayError>;

    /// `GET /register/names`.
    async fn list_player_names(&self) -> Result<Vec<String>, GatewayError>;

    /// `POST /court-reserves`.
    async fn create_reservation(
        &self,
        reservation: &ReservationPayload,
    ) -> Result<Reply, GatewayError>;

    /// `GET /court-reserves`.
    async fn list_reservations(&self) -> Result<Vec<Reservation>, GatewayError>;
}

/// Registration answers carry an embedded `status`; 400 and above is a refusal.
pub fn interpret_registration(body: &[u8]) -> Reply {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => embedded_rejection(&value).unwrap_or(Reply::Accepted),
        Err(_) => Reply::Accepted,
    }
}

/// Reservation answers signal a duplicate booking with an empty or falsy payload.
///
/// An explicit embedded `status` takes precedence when the service sends one.
pub fn interpret_reservation(body: &[u8]) -> Reply {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Reply::Rejected { message: None };
    }
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(value) => value,
        Err(_) => return Reply::Accepted,
    };
    if let Some(rejection) = embedded_rejection(&value) {
        return rejection;
    }
    if is_falsy(&value) {
        Reply::Rejected { message: None }
    } else {
        Reply::Accepted
    }
}

fn embedded_rejection(value: &Value) -> Option<Reply> {
    let status = value.get("status")?.as_u64()?;
    if status < 400 {
        return None;
    }
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string);
    Some(Reply::Rejected { message })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
