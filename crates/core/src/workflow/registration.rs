use async_trait::async_trait;

use super::{Rejection, Submission};
use crate::{
    error::{GatewayError, ValidationError},
    gateway::{CourtApi, Reply},
    models::{NewPlayer, PlayerRegistration, RegistrationField},
    validation::{is_valid_email, passwords_match},
};

#[async_trait]
impl Submission for PlayerRegistration {
    type Payload = NewPlayer;

    const SUCCESS_TITLE: &'static str = "Player created successfully!";

    fn validate(&self) -> Result<(), Rejection<RegistrationField>> {
        if !is_valid_email(&self.email) {
            return Err(Rejection {
                error: ValidationError::InvalidEmail,
                focus: Some(RegistrationField::Email),
            });
        }
        if !passwords_match(&self.pwd, &self.retype_pwd) {
            return Err(Rejection {
                error: ValidationError::PasswordMismatch,
                focus: Some(RegistrationField::Pwd),
            });
        }
        Ok(())
    }

    fn on_rejected(&mut self, error: &ValidationError) {
        if *error == ValidationError::PasswordMismatch {
            self.pwd.clear();
            self.retype_pwd.clear();
        }
    }

    fn payload(&self) -> NewPlayer {
        NewPlayer::from(self)
    }

    async fn send(api: &dyn CourtApi, payload: NewPlayer) -> Result<Reply, GatewayError> {
        api.register_player(&payload).await
    }
}
