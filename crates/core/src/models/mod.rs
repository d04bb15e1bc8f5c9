#![allow(missing_docs)]

//! Shared domain models.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{error::FieldError, form::FormValue, options::OptionKind, validation::is_filled};

/// Wire format of calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Values of the player-registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRegistration {
    /// Display name.
    pub name_player: String,
    /// Mobile phone number.
    pub celular: String,
    /// Contact email.
    pub email: String,
    /// Chosen password.
    pub pwd: String,
    /// Confirmation; never transmitted.
    pub retype_pwd: String,
}

/// Inputs of the registration form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    NamePlayer,
    Celular,
    Email,
    Pwd,
    RetypePwd,
}

impl RegistrationField {
    /// All fields in display order.
    pub const ALL: [Self; 5] = [
        Self::NamePlayer,
        Self::Celular,
        Self::Email,
        Self::Pwd,
        Self::RetypePwd,
    ];

    /// Whether the input should be masked.
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Pwd | Self::RetypePwd)
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NamePlayer => "Name Player",
            Self::Celular => "Cellular",
            Self::Email => "Email",
            Self::Pwd => "Password",
            Self::RetypePwd => "Retype Password",
        };
        f.write_str(label)
    }
}

impl FormValue for PlayerRegistration {
    type Field = RegistrationField;

    fn set_field(&mut self, field: RegistrationField, raw: &str) -> Result<(), FieldError> {
        let slot = match field {
            RegistrationField::NamePlayer => &mut self.name_player,
            RegistrationField::Celular => &mut self.celular,
            RegistrationField::Email => &mut self.email,
            RegistrationField::Pwd => &mut self.pwd,
            RegistrationField::RetypePwd => &mut self.retype_pwd,
        };
        *slot = raw.to_string();
        Ok(())
    }

    fn field_value(&self, field: RegistrationField) -> String {
        match field {
            RegistrationField::NamePlayer => self.name_player.clone(),
            RegistrationField::Celular => self.celular.clone(),
            RegistrationField::Email => self.email.clone(),
            RegistrationField::Pwd => self.pwd.clone(),
            RegistrationField::RetypePwd => self.retype_pwd.clone(),
        }
    }

    fn missing_field(&self) -> Option<RegistrationField> {
        RegistrationField::ALL
            .into_iter()
            .find(|field| !is_filled(&self.field_value(*field)))
    }
}

/// Body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub name_player: String,
    pub celular: String,
    pub email: String,
    pub pwd: String,
}

impl From<&PlayerRegistration> for NewPlayer {
    fn from(value: &PlayerRegistration) -> Self {
        Self {
            name_player: value.name_player.clone(),
            celular: value.celular.clone(),
            email: value.email.clone(),
            pwd: value.pwd.clone(),
        }
    }
}

/// Values of the court-reservation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    /// Selected court.
    pub court: String,
    /// First player's display name.
    pub player1: String,
    /// Second player's display name.
    pub player2: String,
    /// Day of play.
    pub play_date: NaiveDate,
    /// Selected turn slot.
    pub turn: String,
}

impl ReservationRequest {
    /// Empty request for the given default date.
    pub fn new(play_date: NaiveDate) -> Self {
        Self {
            court: String::new(),
            player1: String::new(),
            player2: String::new(),
            play_date,
            turn: String::new(),
        }
    }
}

/// Inputs of the reservation form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationField {
    Court,
    Player1,
    Player2,
    PlayDate,
    Turn,
}

impl ReservationField {
    /// All fields in display order.
    pub const ALL: [Self; 5] = [
        Self::Court,
        Self::Player1,
        Self::Player2,
        Self::PlayDate,
        Self::Turn,
    ];
}

impl fmt::Display for ReservationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Court => "Court",
            Self::Player1 => "Player 1",
            Self::Player2 => "Player 2",
            Self::PlayDate => "Date to Play",
            Self::Turn => "Turn",
        };
        f.write_str(label)
    }
}

impl FormValue for ReservationRequest {
    type Field = ReservationField;

    fn set_field(&mut self, field: ReservationField, raw: &str) -> Result<(), FieldError> {
        match field {
            ReservationField::Court => self.court = raw.to_string(),
            ReservationField::Player1 => self.player1 = raw.to_string(),
            ReservationField::Player2 => self.player2 = raw.to_string(),
            ReservationField::Turn => self.turn = raw.to_string(),
            ReservationField::PlayDate => {
                self.play_date =
                    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|err| {
                        FieldError {
                            field: field.to_string(),
                            value: raw.to_string(),
                            reason: err.to_string(),
                        }
                    })?;
            }
        }
        Ok(())
    }

    fn field_value(&self, field: ReservationField) -> String {
        match field {
            ReservationField::Court => self.court.clone(),
            ReservationField::Player1 => self.player1.clone(),
            ReservationField::Player2 => self.player2.clone(),
            ReservationField::PlayDate => self.play_date.format(DATE_FORMAT).to_string(),
            ReservationField::Turn => self.turn.clone(),
        }
    }

    fn missing_field(&self) -> Option<ReservationField> {
        ReservationField::ALL
            .into_iter()
            .find(|field| !is_filled(&self.field_value(*field)))
    }
}

/// Body of `POST /court-reserves`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    pub court: String,
    pub player1: String,
    pub player2: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date_to_play: NaiveDate,
    pub turn: String,
}

impl From<&ReservationRequest> for ReservationPayload {
    fn from(value: &ReservationRequest) -> Self {
        Self {
            court: value.court.clone(),
            player1: value.player1.clone(),
            player2: value.player2.clone(),
            date_to_play: value.play_date,
            turn: value.turn.clone(),
        }
    }
}

/// A booked court as returned by `GET /court-reserves`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub player1: String,
    pub player2: String,
    /// Date as received from the service.
    pub date_to_play: String,
    pub turn: String,
    pub court: String,
}

impl Reservation {
    /// `date_to_play` normalised to `YYYY-MM-DD`, or as received when unparseable.
    pub fn display_date(&self) -> String {
        normalize_date(&self.date_to_play)
    }
}

/// Normalise a date or timestamp string to `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return date.format(DATE_FORMAT).to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return timestamp.date_naive().format(DATE_FORMAT).to_string();
    }
    // Timestamps without offset still carry the calendar date up front.
    if let Some(prefix) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, DATE_FORMAT) {
            return date.format(DATE_FORMAT).to_string();
        }
    }
    trimmed.to_string()
}

/// Selectable values fetched once per reservation-form session.
///
/// `None` marks a list that has not resolved (yet).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionLists {
    pub courts: Option<Vec<String>>,
    pub turns: Option<Vec<String>>,
    pub players: Option<Vec<String>>,
    /// Lists whose fetch failed; they stay empty for this session.
    pub failed: Vec<OptionKind>,
}

impl OptionLists {
    /// True once every list has arrived.
    pub fn is_complete(&self) -> bool {
        self.courts.is_some() && self.turns.is_some() && self.players.is_some()
    }

    /// True when the list behind `field` failed to load.
    pub fn is_unavailable(&self, field: ReservationField) -> bool {
        OptionKind::for_field(field).is_some_and(|kind| self.failed.contains(&kind))
    }

    /// Options offered for a reservation field; the date has none.
    pub fn for_field(&self, field: ReservationField) -> &[String] {
        let list = match field {
            ReservationField::Court => &self.courts,
            ReservationField::Player1 | ReservationField::Player2 => &self.players,
            ReservationField::Turn => &self.turns,
            ReservationField::PlayDate => return &[],
        };
        list.as_deref().unwrap_or(&[])
    }
}
