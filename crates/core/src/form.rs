//! Form state controller shared by the registration and reservation forms.

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

use crate::error::FieldError;

/// A form value the controller can edit one field at a time.
pub trait FormValue: Clone + fmt::Debug + Serialize {
    /// Field identifier; `Display` yields the user-facing label.
    type Field: Copy + Eq + fmt::Debug + fmt::Display;

    /// Replace exactly one attribute with the raw input.
    fn set_field(&mut self, field: Self::Field, raw: &str) -> Result<(), FieldError>;

    /// Current value of `field` as it would be shown in an input.
    fn field_value(&self, field: Self::Field) -> String;

    /// First required field that is still empty, in form order.
    fn missing_field(&self) -> Option<Self::Field>;
}

/// Where a field-level message is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ErrorSlot {
    /// Required field left empty.
    Required,
    /// Email shape.
    Email,
    /// Password confirmation.
    Password,
    /// Player collision on reservations.
    Players,
}

/// Result of the last completed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Settlement {
    /// The service accepted the submission.
    Success,
    /// Transport failure or application-level rejection.
    Failure,
}

/// Drives the disabled/busy state of the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SubmissionOutcome {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is on the wire; further submits are ignored.
    InFlight,
    /// Last request resolved; the form is interactive again.
    Settled(Settlement),
}

/// Owns the current form value, its field errors and the submission outcome.
#[derive(Debug, Clone, Serialize)]
pub struct FormController<V: FormValue> {
    #[serde(skip)]
    initial: V,
    value: V,
    errors: BTreeMap<ErrorSlot, String>,
    outcome: SubmissionOutcome,
    #[serde(skip)]
    focus: Option<V::Field>,
}

impl<V: FormValue> FormController<V> {
    /// Mount a form; `initial` is the snapshot restored by [`reset`](Self::reset).
    pub fn new(initial: V) -> Self {
        Self {
            value: initial.clone(),
            initial,
            errors: BTreeMap::new(),
            outcome: SubmissionOutcome::Idle,
            focus: None,
        }
    }

    /// Current value snapshot.
    pub fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replace one field and clear stale errors.
    ///
    /// Email, player and required-field messages are always cleared; the
    /// password message only when `password_focus` is set. Nothing is
    /// re-validated here.
    pub fn set_field(
        &mut self,
        field: V::Field,
        raw: &str,
        password_focus: bool,
    ) -> Result<(), FieldError> {
        self.errors.remove(&ErrorSlot::Email);
        self.errors.remove(&ErrorSlot::Players);
        self.errors.remove(&ErrorSlot::Required);
        if password_focus {
            self.errors.remove(&ErrorSlot::Password);
        }
        self.value.set_field(field, raw)
    }

    /// Restore the mount-time snapshot.
    pub fn reset(&mut self) {
        self.value = self.initial.clone();
        self.focus = None;
    }

    /// Message currently shown in `slot`.
    pub fn error(&self, slot: ErrorSlot) -> Option<&str> {
        self.errors.get(&slot).map(String::as_str)
    }

    /// Show `message` in `slot`.
    pub fn set_error(&mut self, slot: ErrorSlot, message: impl Into<String>) {
        self.errors.insert(slot, message.into());
    }

    pub(crate) fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Ask the renderer to move input focus to `field`.
    pub fn request_focus(&mut self, field: V::Field) {
        self.focus = Some(field);
    }

    /// Take the pending focus request, if any.
    pub fn take_focus(&mut self) -> Option<V::Field> {
        self.focus.take()
    }

    /// Outcome of the current or last submission.
    pub fn outcome(&self) -> SubmissionOutcome {
        self.outcome
    }

    /// True while a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.outcome == SubmissionOutcome::InFlight
    }

    pub(crate) fn mark_in_flight(&mut self) {
        self.outcome = SubmissionOutcome::InFlight;
    }

    pub(crate) fn settle(&mut self, settlement: Settlement) {
        self.outcome = SubmissionOutcome::Settled(settlement);
    }
}
