//! Controlled order form.
//!
//! Every mutating handler ends by revalidating, so the inline errors and the
//! submit gate always reflect the current values.

use crate::domain::{
    find_topping, Field, FieldErrors, FormValues, OrderReceipt, Size, SubmissionError,
    ValidationEngine, TOPPINGS,
};
use tracing::{debug, info, warn};

/// Submission phase of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Accepting edits; submit fires when the gate is open
    Editing,
    /// A request is in flight; submit is disabled
    Submitting,
}

/// Control that currently receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    FullName,
    Size,
    /// Index into the topping catalog
    Topping(usize),
    Submit,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            FormFocus::FullName => FormFocus::Size,
            FormFocus::Size => FormFocus::Topping(0),
            FormFocus::Topping(i) if i + 1 < TOPPINGS.len() => FormFocus::Topping(i + 1),
            FormFocus::Topping(_) => FormFocus::Submit,
            FormFocus::Submit => FormFocus::FullName,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormFocus::FullName => FormFocus::Submit,
            FormFocus::Size => FormFocus::FullName,
            FormFocus::Topping(0) => FormFocus::Size,
            FormFocus::Topping(i) => FormFocus::Topping(i - 1),
            FormFocus::Submit => FormFocus::Topping(TOPPINGS.len() - 1),
        }
    }
}

/// State of the pizza order form.
///
/// # Examples
///
/// ```
/// use bloom_pizza::application::OrderForm;
/// use bloom_pizza::domain::Field;
///
/// let mut form = OrderForm::default();
/// assert!(!form.submit_enabled);
///
/// form.set_text(Field::FullName, "Jane Doe");
/// form.set_text(Field::Size, "M");
/// assert!(form.submit_enabled);
/// ```
#[derive(Debug, Clone)]
pub struct OrderForm {
    /// Authoritative field values
    pub values: FormValues,
    /// Inline error text per field
    pub errors: FieldErrors,
    /// Whether the submit control is enabled
    pub submit_enabled: bool,
    pub phase: FormPhase,
    /// Message returned by the order service after the last successful order
    pub message: Option<String>,
    /// Description of the last failed submission
    pub fault: Option<String>,
    pub focus: FormFocus,
    /// Cursor position within the full name, in characters
    pub cursor_position: usize,
    engine: ValidationEngine,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new(ValidationEngine::order_form())
    }
}

impl OrderForm {
    pub fn new(engine: ValidationEngine) -> Self {
        let mut form = Self {
            values: FormValues::default(),
            errors: FieldErrors::default(),
            submit_enabled: false,
            phase: FormPhase::Editing,
            message: None,
            fault: None,
            focus: FormFocus::FullName,
            cursor_position: 0,
            engine,
        };
        form.refresh_gate();
        form
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Replaces a text field's value and recomputes its inline error.
    ///
    /// The topping set is not a text field; passing [`Field::Toppings`] is a no-op.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FullName => {
                self.values.full_name = value;
                self.cursor_position = self.cursor_position.min(self.values.full_name.chars().count());
            }
            Field::Size => self.values.size = value,
            Field::Toppings => return,
        }

        let current = self.values.text(field).unwrap_or_default();
        match self.engine.validate_field(field.name(), current) {
            Ok(()) => self.errors.clear(field),
            Err(err) => {
                debug!(field = field.name(), error = %err, "field failed validation");
                self.errors.set(field, err.to_string());
            }
        }
        self.refresh_gate();
    }

    /// Adds the topping if absent, removes it otherwise. Unknown ids are ignored.
    pub fn toggle_topping(&mut self, id: &str) {
        if find_topping(id).is_none() {
            debug!(id, "ignoring unknown topping");
            return;
        }
        if !self.values.toppings.remove(id) {
            self.values.toppings.insert(id.to_string());
        }
        self.refresh_gate();
    }

    /// Moves to `Submitting` and returns the payload to send, if the gate is open.
    pub fn begin_submit(&mut self) -> Option<FormValues> {
        if self.phase != FormPhase::Editing || !self.submit_enabled {
            debug!(phase = ?self.phase, enabled = self.submit_enabled, "submit ignored");
            return None;
        }

        self.phase = FormPhase::Submitting;
        self.message = None;
        self.fault = None;
        self.refresh_gate();
        info!(full_name = %self.values.full_name, size = %self.values.size, toppings = self.values.toppings.len(), "submitting order");
        Some(self.values.clone())
    }

    /// Applies the outcome of the request started by [`OrderForm::begin_submit`].
    ///
    /// On success the values reset and the service's message is shown. On
    /// failure the values stay put so the order can be retried.
    pub fn complete_submit(&mut self, result: Result<OrderReceipt, SubmissionError>) {
        if self.phase != FormPhase::Submitting {
            warn!("received a submission result while not submitting");
        }
        self.phase = FormPhase::Editing;

        match result {
            Ok(receipt) => {
                info!(message = %receipt.message, "order accepted");
                self.message = Some(receipt.message);
                self.values = FormValues::default();
                self.errors = FieldErrors::default();
                self.cursor_position = 0;
                self.focus = FormFocus::FullName;
            }
            Err(err) => {
                warn!(error = %err, "order submission failed");
                self.fault = Some(err.to_string());
            }
        }
        self.refresh_gate();
    }

    fn refresh_gate(&mut self) {
        self.submit_enabled =
            self.phase == FormPhase::Editing && self.engine.validate_all(&self.values);
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Steps the size select forward or backward.
    pub fn cycle_size(&mut self, forward: bool) {
        let next = if forward {
            Size::cycle(&self.values.size)
        } else {
            Size::cycle_back(&self.values.size)
        };
        self.set_text(Field::Size, next);
    }

    /// Toggles the topping under the focus, if any.
    pub fn toggle_focused_topping(&mut self) {
        if let FormFocus::Topping(index) = self.focus {
            if let Some(topping) = TOPPINGS.get(index) {
                self.toggle_topping(topping.id);
            }
        }
    }

    fn byte_index(&self, char_position: usize) -> usize {
        self.values
            .full_name
            .char_indices()
            .nth(char_position)
            .map(|(i, _)| i)
            .unwrap_or(self.values.full_name.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let mut name = self.values.full_name.clone();
        name.insert(self.byte_index(self.cursor_position), c);
        self.cursor_position += 1;
        self.set_text(Field::FullName, name);
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let mut name = self.values.full_name.clone();
        name.remove(self.byte_index(self.cursor_position - 1));
        self.cursor_position -= 1;
        self.set_text(Field::FullName, name);
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor_position >= self.values.full_name.chars().count() {
            return;
        }
        let mut name = self.values.full_name.clone();
        name.remove(self.byte_index(self.cursor_position));
        self.set_text(Field::FullName, name);
    }

    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor_position < self.values.full_name.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = self.values.full_name.chars().count();
    }
}
