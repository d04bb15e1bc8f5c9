//! Submission workflow: validate, send once, interpret, notify, reset or keep.
//!
//! ```text
//! idle -> validating -> rejected ------------------------> idle
//!                    \-> submitting -> succeeded | failed -> idle
//! ```
//!
//! [`begin`] covers validation and entry to `submitting`, [`settle`] covers
//! the resolution. Front ends that cannot block on the request (the TUI
//! spawns it) call the two halves separately; [`submit`] chains them.

mod registration;
mod reservation;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    error::{GatewayError, ValidationError},
    form::{FormController, FormValue, Settlement},
    gateway::{CourtApi, Reply},
};

/// Text shown when the service gives no explanation.
pub const GENERIC_FAILURE: &str = "Something went wrong!";
/// Title of every failure notification.
pub const FAILURE_TITLE: &str = "Oops...";

/// A validation failure and the field that should receive focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection<F> {
    /// What failed.
    pub error: ValidationError,
    /// Field to focus, when applicable.
    pub focus: Option<F>,
}

/// A form that can be submitted to the reservation service.
#[async_trait]
pub trait Submission: FormValue + Send + Sync + 'static {
    /// What is actually transmitted.
    type Payload: Serialize + Send + Sync + 'static;

    /// Title of the success notification.
    const SUCCESS_TITLE: &'static str;

    /// Business rules in their fixed order; the first failure wins.
    fn validate(&self) -> Result<(), Rejection<Self::Field>>;

    /// Adjust the value after a rejected attempt.
    fn on_rejected(&mut self, error: &ValidationError) {
        let _ = error;
    }

    /// Build the transmitted payload, dropping fields that are never sent.
    fn payload(&self) -> Self::Payload;

    /// Issue the single request for this form.
    async fn send(api: &dyn CourtApi, payload: Self::Payload) -> Result<Reply, GatewayError>;
}

/// Result of entering the workflow.
#[derive(Debug)]
pub enum Begin<P> {
    /// Validation passed; send this payload exactly once.
    Ready(P),
    /// A request is already in flight; nothing changed.
    Busy,
    /// Validation failed; the form shows the error.
    Rejected(ValidationError),
}

/// Visual tone of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    /// Operation completed.
    Success,
    /// Operation failed for any reason.
    Failure,
}

/// User-facing outcome of a settled submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Tone of the message.
    pub kind: NotificationKind,
    /// Headline.
    pub title: String,
    /// Optional detail line.
    pub text: Option<String>,
}

impl Notification {
    /// Success with a headline only.
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            text: None,
        }
    }

    /// Failure carrying the server message or the generic one.
    pub fn failure(message: Option<String>) -> Self {
        Self {
            kind: NotificationKind::Failure,
            title: FAILURE_TITLE.to_string(),
            text: Some(message.unwrap_or_else(|| GENERIC_FAILURE.to_string())),
        }
    }

    /// True for success notifications.
    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

/// Outcome of [`submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    /// Ignored because a request was in flight.
    Busy,
    /// Stopped locally; no request was sent.
    Rejected(ValidationError),
    /// The request resolved.
    Settled(Notification),
}

/// Run validation and, on success, move the form into `submitting`.
pub fn begin<V: Submission>(form: &mut FormController<V>) -> Begin<V::Payload> {
    if form.is_busy() {
        return Begin::Busy;
    }

    let rejection = match form.value().missing_field() {
        Some(field) => Some(Rejection {
            error: ValidationError::MissingField(field.to_string()),
            focus: Some(field),
        }),
        None => form.value().validate().err(),
    };

    if let Some(Rejection { error, focus }) = rejection {
        info!(%error, "Submission rejected by validation");
        form.set_error(error.slot(), error.to_string());
        if let Some(field) = focus {
            form.request_focus(field);
        }
        form.value_mut().on_rejected(&error);
        return Begin::Rejected(error);
    }

    form.clear_errors();
    form.mark_in_flight();
    Begin::Ready(form.value().payload())
}

/// Interpret the gateway result, notify, and leave `submitting`.
pub fn settle<V: Submission>(
    form: &mut FormController<V>,
    result: Result<Reply, GatewayError>,
) -> Notification {
    let (settlement, notification) = match result {
        Ok(Reply::Accepted) => {
            info!(title = V::SUCCESS_TITLE, "Submission accepted");
            form.reset();
            (Settlement::Success, Notification::success(V::SUCCESS_TITLE))
        }
        Ok(Reply::Rejected { message }) => {
            warn!(
                reason = message.as_deref().unwrap_or("-"),
                "Submission refused by service"
            );
            (Settlement::Failure, Notification::failure(message))
        }
        Err(err) => {
            error!(%err, "Failed to submit form");
            (Settlement::Failure, Notification::failure(None))
        }
    };
    form.settle(settlement);
    notification
}

/// Validate, send exactly once and settle.
pub async fn submit<V: Submission>(
    form: &mut FormController<V>,
    api: &dyn CourtApi,
) -> SubmitResult {
    let payload = match begin(form) {
        Begin::Ready(payload) => payload,
        Begin::Busy => return SubmitResult::Busy,
        Begin::Rejected(error) => return SubmitResult::Rejected(error),
    };
    let result = V::send(api, payload).await;
    SubmitResult::Settled(settle(form, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        form::{ErrorSlot, SubmissionOutcome},
        gateway::testing::unavailable,
        models::PlayerRegistration,
    };

    fn valid() -> FormController<PlayerRegistration> {
        FormController::new(PlayerRegistration {
            name_player: "Ana".into(),
            celular: "+56912345678".into(),
            email: "ana@club.cl".into(),
            pwd: "secret".into(),
            retype_pwd: "secret".into(),
        })
    }

    #[test]
    fn begin_marks_in_flight_and_blocks_duplicates() {
        let mut form = valid();
        assert!(matches!(begin(&mut form), Begin::Ready(_)));
        assert!(form.is_busy());
        assert!(matches!(begin(&mut form), Begin::Busy));
    }

    #[test]
    fn transport_failure_keeps_values_and_returns_to_idle() {
        let mut form = valid();
        let before = form.value().clone();
        let _ = begin(&mut form);

        let notification = settle(&mut form, Err(unavailable()));
        assert_eq!(notification, Notification::failure(None));
        assert_eq!(notification.text.as_deref(), Some(GENERIC_FAILURE));
        assert_eq!(form.value(), &before);
        assert_eq!(
            form.outcome(),
            SubmissionOutcome::Settled(Settlement::Failure)
        );
        assert!(matches!(begin(&mut form), Begin::Ready(_)));
    }

    #[test]
    fn rejection_uses_server_message() {
        let mut form = valid();
        let _ = begin(&mut form);
        let notification = settle(
            &mut form,
            Ok(Reply::Rejected {
                message: Some("Email already registered".into()),
            }),
        );
        assert_eq!(notification.kind, NotificationKind::Failure);
        assert_eq!(notification.title, FAILURE_TITLE);
        assert_eq!(notification.text.as_deref(), Some("Email already registered"));
        assert!(!form.is_busy());
    }

    #[test]
    fn passing_validation_clears_old_messages() {
        let mut form = valid();
        form.set_error(ErrorSlot::Password, "Passwords do not match!");
        let _ = begin(&mut form);
        assert_eq!(form.error(ErrorSlot::Password), None);
    }
}
