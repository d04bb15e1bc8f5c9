use async_trait::async_trait;

use super::{Rejection, Submission};
use crate::{
    error::{GatewayError, ValidationError},
    gateway::{CourtApi, Reply},
    models::{ReservationField, ReservationPayload, ReservationRequest},
    validation::players_distinct,
};

#[async_trait]
impl Submission for ReservationRequest {
    type Payload = ReservationPayload;

    const SUCCESS_TITLE: &'static str = "Reservation created successfully!";

    fn validate(&self) -> Result<(), Rejection<ReservationField>> {
        if !players_distinct(&self.player1, &self.player2) {
            return Err(Rejection {
                error: ValidationError::PlayerCollision,
                focus: Some(ReservationField::Player2),
            });
        }
        Ok(())
    }

    fn payload(&self) -> ReservationPayload {
        ReservationPayload::from(self)
    }

    async fn send(
        api: &dyn CourtApi,
        payload: ReservationPayload,
    ) -> Result<Reply, GatewayError> {
        api.create_reservation(&payload).await
    }
}
