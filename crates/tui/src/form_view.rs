//! Key handling and display state shared by the two forms.

use anyhow::Result;
use chrono::NaiveDate;
use courtside_core::{
    form::ErrorSlot,
    models::{
        OptionLists, PlayerRegistration, RegistrationField, ReservationField, ReservationRequest,
        DATE_FORMAT,
    },
    workflow::Submission,
    BookingWindow, FormController, SharedOptions,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// How a field is edited and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Secret,
    Select,
    Date,
}

/// Terminal layout of a submittable form.
pub trait FormLayout: Submission {
    const FIELDS: &'static [Self::Field];
    const SUBMIT_LABEL: &'static str;

    fn input_kind(field: Self::Field) -> InputKind;

    fn placeholder(field: Self::Field) -> &'static str;

    /// Error slots rendered under `field`.
    fn errors_for(field: Self::Field) -> &'static [ErrorSlot];

    fn choices(field: Self::Field, lists: &OptionLists) -> &[String] {
        let _ = (field, lists);
        &[]
    }

    /// Whether the choices for `field` failed to load.
    fn unavailable(field: Self::Field, lists: &OptionLists) -> bool {
        let _ = (field, lists);
        false
    }
}

impl FormLayout for PlayerRegistration {
    const FIELDS: &'static [RegistrationField] = &RegistrationField::ALL;
    const SUBMIT_LABEL: &'static str = "Generate Player";

    fn input_kind(field: RegistrationField) -> InputKind {
        if field.is_secret() {
            InputKind::Secret
        } else {
            InputKind::Text
        }
    }

    fn placeholder(field: RegistrationField) -> &'static str {
        match field {
            RegistrationField::NamePlayer => "Name Player",
            RegistrationField::Celular => "+56912345678",
            RegistrationField::Email => "Email",
            RegistrationField::Pwd | RegistrationField::RetypePwd => "",
        }
    }

    fn errors_for(field: RegistrationField) -> &'static [ErrorSlot] {
        match field {
            RegistrationField::Email => &[ErrorSlot::Email],
            RegistrationField::RetypePwd => &[ErrorSlot::Password],
            _ => &[],
        }
    }
}

impl FormLayout for ReservationRequest {
    const FIELDS: &'static [ReservationField] = &ReservationField::ALL;
    const SUBMIT_LABEL: &'static str = "TRY RESERVE";

    fn input_kind(field: ReservationField) -> InputKind {
        match field {
            ReservationField::PlayDate => InputKind::Date,
            _ => InputKind::Select,
        }
    }

    fn placeholder(field: ReservationField) -> &'static str {
        match field {
            ReservationField::Court => "Select Court Number",
            ReservationField::Player1 => "Select Player 1",
            ReservationField::Player2 => "Select Player 2",
            ReservationField::Turn => "Select Turn",
            ReservationField::PlayDate => "",
        }
    }

    fn errors_for(field: ReservationField) -> &'static [ErrorSlot] {
        match field {
            ReservationField::Player2 => &[ErrorSlot::Players],
            _ => &[],
        }
    }

    fn choices(field: ReservationField, lists: &OptionLists) -> &[String] {
        lists.for_field(field)
    }

    fn unavailable(field: ReservationField, lists: &OptionLists) -> bool {
        lists.is_unavailable(field)
    }
}

/// What the app should do after a key press on a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

/// A mounted form: controller plus cursor and the resources it owns.
pub struct FormScreen<V: FormLayout> {
    /// Identifies this mount; results for older mounts are dropped.
    pub session: u64,
    pub form: FormController<V>,
    /// Index into `V::FIELDS`; one past the end is the submit button.
    pub cursor: usize,
    /// Field named by the last required-field rejection.
    pub missing: Option<V::Field>,
    pub options: Option<SharedOptions>,
    pub window: Option<BookingWindow>,
}

impl<V: FormLayout> FormScreen<V> {
    pub fn new(session: u64, initial: V) -> Self {
        Self {
            session,
            form: FormController::new(initial),
            cursor: 0,
            missing: None,
            options: None,
            window: None,
        }
    }

    pub fn with_options(mut self, options: SharedOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_window(mut self, window: BookingWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn focused_field(&self) -> Option<V::Field> {
        V::FIELDS.get(self.cursor).copied()
    }

    pub fn on_submit_button(&self) -> bool {
        self.cursor == V::FIELDS.len()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let stops = V::FIELDS.len() as isize + 1;
        self.cursor = (self.cursor as isize + delta).rem_euclid(stops) as usize;
    }

    pub fn focus(&mut self, field: V::Field) {
        if let Some(index) = V::FIELDS.iter().position(|candidate| *candidate == field) {
            self.cursor = index;
        }
    }

    /// Move the cursor where the controller asked for focus.
    pub fn apply_focus_request(&mut self) -> Option<V::Field> {
        let field = self.form.take_focus()?;
        self.focus(field);
        Some(field)
    }

    pub fn option_lists(&self) -> OptionLists {
        self.options
            .as_ref()
            .map(SharedOptions::snapshot)
            .unwrap_or_default()
    }

    /// Text shown in the input for `field`.
    pub fn display_value(&self, field: V::Field, lists: &OptionLists) -> String {
        let value = self.form.value().field_value(field);
        match V::input_kind(field) {
            InputKind::Secret => "*".repeat(value.chars().count()),
            InputKind::Select if value.is_empty() => {
                let placeholder = V::placeholder(field);
                if V::unavailable(field, lists) {
                    format!("{placeholder} (unavailable)")
                } else if V::choices(field, lists).is_empty() {
                    format!("{placeholder} (loading…)")
                } else {
                    placeholder.to_string()
                }
            }
            InputKind::Text if value.is_empty() => V::placeholder(field).to_string(),
            _ => value,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<FormAction> {
        match key.code {
            KeyCode::Esc => return Ok(FormAction::Cancel),
            KeyCode::Enter => return Ok(FormAction::Submit),
            KeyCode::Tab | KeyCode::Down => self.move_cursor(1),
            KeyCode::BackTab | KeyCode::Up => self.move_cursor(-1),
            _ => {
                if let Some(field) = self.focused_field() {
                    self.edit(field, key)?;
                }
            }
        }
        Ok(FormAction::None)
    }

    fn edit(&mut self, field: V::Field, key: KeyEvent) -> Result<()> {
        match V::input_kind(field) {
            InputKind::Text | InputKind::Secret => {
                let mut value = self.form.value().field_value(field);
                match key.code {
                    KeyCode::Char(ch)
                        if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
                    {
                        value.push(ch)
                    }
                    KeyCode::Backspace => {
                        if value.pop().is_none() {
                            return Ok(());
                        }
                    }
                    _ => return Ok(()),
                }
                self.set(field, &value)
            }
            InputKind::Select => {
                let delta: isize = match key.code {
                    KeyCode::Left => -1,
                    KeyCode::Right | KeyCode::Char(' ') => 1,
                    _ => return Ok(()),
                };
                let lists = self.option_lists();
                let choices = V::choices(field, &lists);
                if choices.is_empty() {
                    return Ok(());
                }
                let current = self.form.value().field_value(field);
                let next = match choices.iter().position(|choice| *choice == current) {
                    Some(index) => {
                        (index as isize + delta).rem_euclid(choices.len() as isize) as usize
                    }
                    None if delta < 0 => choices.len() - 1,
                    None => 0,
                };
                let choice = choices[next].clone();
                self.set(field, &choice)
            }
            InputKind::Date => {
                let Some(window) = self.window else {
                    return Ok(());
                };
                let delta = match key.code {
                    KeyCode::Left => -1,
                    KeyCode::Right => 1,
                    _ => return Ok(()),
                };
                let current =
                    NaiveDate::parse_from_str(&self.form.value().field_value(field), DATE_FORMAT)
                        .unwrap_or_else(|_| window.first());
                let next = window.step(current, delta);
                self.set(field, &next.format(DATE_FORMAT).to_string())
            }
        }
    }

    fn set(&mut self, field: V::Field, raw: &str) -> Result<()> {
        self.missing = None;
        let password_focus = V::input_kind(field) == InputKind::Secret;
        self.form.set_field(field, raw, password_focus)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courtside_core::options::OptionKind;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text<V: FormLayout>(screen: &mut FormScreen<V>, text: &str) -> Result<()> {
        for ch in text.chars() {
            screen.handle_key(press(KeyCode::Char(ch)))?;
        }
        Ok(())
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).expect("valid date")
    }

    #[test]
    fn typing_edits_the_focused_field() -> Result<()> {
        let mut screen = FormScreen::new(1, PlayerRegistration::default());
        type_text(&mut screen, "Anna")?;
        screen.handle_key(press(KeyCode::Backspace))?;
        screen.handle_key(press(KeyCode::Tab))?;
        type_text(&mut screen, "+569")?;

        assert_eq!(screen.form.value().name_player, "Ann");
        assert_eq!(screen.form.value().celular, "+569");
        Ok(())
    }

    #[test]
    fn secrets_are_masked() -> Result<()> {
        let mut screen = FormScreen::new(1, PlayerRegistration::default());
        screen.focus(RegistrationField::Pwd);
        type_text(&mut screen, "abc")?;
        let shown = screen.display_value(RegistrationField::Pwd, &OptionLists::default());
        assert_eq!(shown, "***");
        Ok(())
    }

    #[test]
    fn enter_submits_and_escape_cancels() -> Result<()> {
        let mut screen = FormScreen::new(1, PlayerRegistration::default());
        assert_eq!(screen.handle_key(press(KeyCode::Enter))?, FormAction::Submit);
        assert_eq!(screen.handle_key(press(KeyCode::Esc))?, FormAction::Cancel);
        Ok(())
    }

    #[test]
    fn cursor_wraps_through_the_submit_button() {
        let mut screen = FormScreen::new(1, PlayerRegistration::default());
        screen.move_cursor(-1);
        assert!(screen.on_submit_button());
        screen.move_cursor(1);
        assert_eq!(screen.focused_field(), Some(RegistrationField::NamePlayer));
    }

    #[test]
    fn selects_cycle_through_resolved_options_only() -> Result<()> {
        let options = SharedOptions::new();
        let mut screen =
            FormScreen::new(1, ReservationRequest::new(day(1))).with_options(options.clone());

        screen.handle_key(press(KeyCode::Right))?;
        assert_eq!(screen.form.value().court, "");

        options.store(OptionKind::Courts, vec!["1".into(), "2".into()]);
        screen.handle_key(press(KeyCode::Right))?;
        assert_eq!(screen.form.value().court, "1");
        screen.handle_key(press(KeyCode::Right))?;
        assert_eq!(screen.form.value().court, "2");
        screen.handle_key(press(KeyCode::Right))?;
        assert_eq!(screen.form.value().court, "1");
        screen.handle_key(press(KeyCode::Left))?;
        assert_eq!(screen.form.value().court, "2");
        Ok(())
    }

    #[test]
    fn failed_list_is_shown_as_unavailable() {
        let options = SharedOptions::new();
        let screen =
            FormScreen::new(1, ReservationRequest::new(day(1))).with_options(options.clone());

        let lists = screen.option_lists();
        let shown = screen.display_value(ReservationField::Turn, &lists);
        assert_eq!(shown, "Select Turn (loading…)");

        options.mark_failed(OptionKind::Turns);
        let lists = screen.option_lists();
        let shown = screen.display_value(ReservationField::Turn, &lists);
        assert_eq!(shown, "Select Turn (unavailable)");
        let shown = screen.display_value(ReservationField::Court, &lists);
        assert_eq!(shown, "Select Court Number (loading…)");
    }

    #[test]
    fn date_stays_inside_the_booking_window() -> Result<()> {
        let window = BookingWindow::starting(day(1), 2);
        let mut screen = FormScreen::new(1, ReservationRequest::new(day(1))).with_window(window);
        screen.focus(ReservationField::PlayDate);

        for _ in 0..4 {
            screen.handle_key(press(KeyCode::Right))?;
        }
        assert_eq!(screen.form.value().play_date, day(3));
        for _ in 0..4 {
            screen.handle_key(press(KeyCode::Left))?;
        }
        assert_eq!(screen.form.value().play_date, day(1));
        Ok(())
    }
}
