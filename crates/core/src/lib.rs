#![warn(clippy::all, missing_docs)]

//! Core domain logic for the Courtside reservation client.
//!
//! This crate hosts the form models, validation rules, the form state
//! controller and submission workflow, and the HTTP gateway to the
//! reservation service. The terminal UI is a thin layer on top.

pub mod booking;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod models;
pub mod options;
pub mod validation;
pub mod workflow;

pub use booking::BookingWindow;
pub use config::AppConfig;
pub use error::{GatewayError, ValidationError};
pub use form::{ErrorSlot, FormController, FormValue, SubmissionOutcome};
pub use gateway::{CourtApi, HttpCourtApi};
pub use models::{
    NewPlayer, OptionLists, PlayerRegistration, RegistrationField, Reservation,
    ReservationField, ReservationPayload, ReservationRequest,
};
pub use options::{spawn_option_fetches, SharedOptions};
pub use workflow::{Notification, NotificationKind, SubmitResult};
