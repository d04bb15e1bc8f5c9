//! In-memory [`CourtApi`] used by workflow and loader tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::{CourtApi, Reply};
use crate::{
    error::GatewayError,
    models::{NewPlayer, Reservation, ReservationPayload},
};

/// Scripted answer for the two write operations.
#[derive(Debug, Clone)]
pub(crate) enum Script {
    Accept,
    Reject(Option<String>),
    Fail,
}

pub(crate) struct FakeCourtApi {
    pub script: Script,
    pub courts: Vec<String>,
    pub turns: Vec<String>,
    pub players: Vec<String>,
    pub courts_gate: Option<Arc<Notify>>,
    pub turns_gate: Option<Arc<Notify>>,
    pub players_gate: Option<Arc<Notify>>,
    pub fail_turns: bool,
    pub registered: Mutex<Vec<NewPlayer>>,
    pub reserved: Mutex<Vec<ReservationPayload>>,
}

impl FakeCourtApi {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            courts: vec!["1".to_string(), "2".to_string()],
            turns: vec!["08:00-09:00".to_string(), "09:00-10:00".to_string()],
            players: vec!["Ana".to_string(), "Bea".to_string(), "Cata".to_string()],
            courts_gate: None,
            turns_gate: None,
            players_gate: None,
            fail_turns: false,
            registered: Mutex::new(Vec::new()),
            reserved: Mutex::new(Vec::new()),
        }
    }

    fn answer(&self) -> Result<Reply, GatewayError> {
        match &self.script {
            Script::Accept => Ok(Reply::Accepted),
            Script::Reject(message) => Ok(Reply::Rejected {
                message: message.clone(),
            }),
            Script::Fail => Err(unavailable()),
        }
    }
}

pub(crate) fn unavailable() -> GatewayError {
    GatewayError::Status {
        url: "fake://court".to_string(),
        status: 503,
        body: "unavailable".to_string(),
    }
}

async fn pass(gate: &Option<Arc<Notify>>) {
    if let Some(gate) = gate {
        gate.notified().await;
    }
}

#[async_trait]
impl CourtApi for FakeCourtApi {
    async fn register_player(&self, player: &NewPlayer) -> Result<Reply, GatewayError> {
        self.registered.lock().push(player.clone());
        self.answer()
    }

    async fn list_courts(&self) -> Result<Vec<String>, GatewayError> {
        pass(&self.courts_gate).await;
        Ok(self.courts.clone())
    }

    async fn list_turn_slots(&self) -> Result<Vec<String>, GatewayError> {
        pass(&self.turns_gate).await;
        if self.fail_turns {
            return Err(unavailable());
        }
        Ok(self.turns.clone())
    }

    async fn list_player_names(&self) -> Result<Vec<String>, GatewayError> {
        pass(&self.players_gate).await;
        Ok(self.players.clone())
    }

    async fn create_reservation(
        &self,
        reservation: &ReservationPayload,
    ) -> Result<Reply, GatewayError> {
        self.reserved.lock().push(reservation.clone());
        self.answer()
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, GatewayError> {
        Ok(Vec::new())
    }
}
