//! Error taxonomy shared by the forms and the gateway.

use thiserror::Error;

use crate::form::ErrorSlot;

/// A submission stopped locally before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was left empty.
    #[error("Please fill out this field.")]
    MissingField(String),
    /// The email does not look like `local@domain.tld`.
    #[error("Invalid email")]
    InvalidEmail,
    /// Password and its confirmation differ.
    #[error("Passwords do not match!")]
    PasswordMismatch,
    /// Both reservation slots name the same player.
    #[error("Players must be different!")]
    PlayerCollision,
}

impl ValidationError {
    /// Error slot the message is displayed under.
    pub fn slot(&self) -> ErrorSlot {
        match self {
            Self::MissingField(_) => ErrorSlot::Required,
            Self::InvalidEmail => ErrorSlot::Email,
            Self::PasswordMismatch => ErrorSlot::Password,
            Self::PlayerCollision => ErrorSlot::Players,
        }
    }
}

/// A raw input could not be stored in its field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} cannot hold {value:?}: {reason}")]
pub struct FieldError {
    /// Label of the field being edited.
    pub field: String,
    /// Rejected raw input.
    pub value: String,
    /// Parser message.
    pub reason: String,
}

/// The reservation service could not be reached or answered with an error status.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Request {
        /// Target URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("{url} responded with {status}: {body}")]
    Status {
        /// Target URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response text, if readable.
        body: String,
    },
    /// The response body did not have the expected shape.
    #[error("failed to decode response from {url}: {reason}")]
    Decode {
        /// Target URL.
        url: String,
        /// Decoder message.
        reason: String,
    },
}
