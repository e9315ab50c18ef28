//! Form fields with validation.
//!
//! A [`FormField`] wraps a single-line input. It validates on blur, and on
//! change only once the user has left the field at least once, so a half-typed
//! email does not flash an error on the first keystroke.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::trace;

use crate::validation::{validate_value, ValidationOutcome, ValidationRule};
use ipokit_tui_core::Theme;

/// Observable state of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    /// Set on first blur.
    pub touched: bool,
    /// Message of the first failing rule, shown once validation has run.
    pub error: Option<String>,
    pub is_valid: bool,
}

impl Default for FieldState {
    fn default() -> Self {
        Self {
            value: String::new(),
            touched: false,
            error: None,
            is_valid: true,
        }
    }
}

/// A single validated input.
#[derive(Debug, Clone)]
pub struct FormField {
    name: String,
    label: String,
    placeholder: Option<String>,
    required: bool,
    rules: Vec<ValidationRule>,
    validate_on_blur: bool,
    validate_on_change: bool,
    state: FieldState,
    /// Byte offset into the value.
    cursor: usize,
    focused: bool,
}

impl FormField {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            placeholder: None,
            required: false,
            rules: Vec::new(),
            validate_on_blur: true,
            validate_on_change: true,
            state: FieldState::default(),
            cursor: 0,
            focused: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.refresh_validity();
        self
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self.refresh_validity();
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = ValidationRule>) -> Self {
        self.rules.extend(rules);
        self.refresh_validity();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.state.value = value.into();
        self.cursor = self.state.value.len();
        self.refresh_validity();
        self
    }

    pub fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = enabled;
        self
    }

    pub fn validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn value(&self) -> &str {
        &self.state.value
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Evaluate the current value without touching the displayed state.
    pub fn check(&self) -> ValidationOutcome {
        validate_value(&self.state.value, self.required, &self.rules)
    }

    /// Replace the value. Validates only when touched and change validation is on.
    pub fn handle_change(&mut self, value: impl Into<String>) {
        self.state.value = value.into();
        self.cursor = self.cursor.min(self.state.value.len());
        while !self.state.value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }

        if self.state.touched && self.validate_on_change {
            self.validate();
        } else {
            self.refresh_validity();
        }
    }

    /// Leave the field: mark touched and validate if blur validation is on.
    pub fn handle_blur(&mut self) {
        self.focused = false;
        self.state.touched = true;
        if self.validate_on_blur {
            self.validate();
        }
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Run validation and publish the outcome.
    pub fn validate(&mut self) -> bool {
        let outcome = self.check();
        trace!(field = %self.name, valid = outcome.is_valid, "Field validated");
        self.state.is_valid = outcome.is_valid;
        self.state.error = outcome.error;
        self.state.is_valid
    }

    /// Mark touched and validate, as on a submit attempt.
    pub fn touch_and_validate(&mut self) -> bool {
        self.state.touched = true;
        self.validate()
    }

    /// Clear the value and all validation state.
    pub fn reset(&mut self) {
        self.state = FieldState::default();
        self.cursor = 0;
        self.refresh_validity();
    }

    fn refresh_validity(&mut self) {
        self.state.is_valid = self.check().is_valid;
    }

    fn edited(&mut self, value: String) {
        self.handle_change(value);
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let mut value = self.state.value.clone();
        value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.edited(value);
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_char_boundary(self.cursor);
        let mut value = self.state.value.clone();
        value.drain(prev..self.cursor);
        self.cursor = prev;
        self.edited(value);
    }

    /// Delete the character at the cursor.
    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.state.value.len() {
            return;
        }
        let next = self.next_char_boundary(self.cursor);
        let mut value = self.state.value.clone();
        value.drain(self.cursor..next);
        self.edited(value);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.prev_char_boundary(self.cursor);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = self.next_char_boundary(self.cursor);
    }

    pub fn cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.state.value.len();
    }

    fn prev_char_boundary(&self, byte_idx: usize) -> usize {
        if byte_idx == 0 {
            return 0;
        }
        let mut idx = byte_idx - 1;
        while idx > 0 && !self.state.value.is_char_boundary(idx) {
            idx -= 1;
        }
        idx
    }

    fn next_char_boundary(&self, byte_idx: usize) -> usize {
        let len = self.state.value.len();
        if byte_idx >= len {
            return len;
        }
        let mut idx = byte_idx + 1;
        while idx < len && !self.state.value.is_char_boundary(idx) {
            idx += 1;
        }
        idx
    }

    /// Apply an editing key. Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c)
            }
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Delete => self.delete_char_forward(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor_start(),
            KeyCode::End => self.cursor_end(),
            _ => return false,
        }
        true
    }

    /// Label line, input line and error line.
    pub fn height(&self) -> u16 {
        3
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if area.height == 0 {
            return;
        }

        let mut label = vec![Span::styled(self.label.as_str(), theme.bold())];
        if self.required {
            label.push(Span::styled(" *", theme.error_style()));
        }

        let marker_style = if self.focused {
            theme.border_active_style()
        } else {
            theme.border_style()
        };
        let mut input = vec![Span::styled("› ", marker_style)];
        if self.state.value.is_empty() && !self.focused {
            if let Some(placeholder) = &self.placeholder {
                input.push(Span::styled(placeholder.as_str(), theme.dim_style()));
            }
        } else if self.focused {
            let value = &self.state.value;
            let cursor = self.cursor.min(value.len());
            let at_cursor = value[cursor..]
                .chars()
                .next()
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after = &value[self.next_char_boundary(cursor)..];
            input.push(Span::styled(&value[..cursor], theme.text_style()));
            input.push(Span::styled(
                at_cursor,
                theme.text_style().add_modifier(Modifier::REVERSED),
            ));
            input.push(Span::styled(after, theme.text_style()));
        } else {
            input.push(Span::styled(self.state.value.as_str(), theme.text_style()));
        }

        let error = match &self.state.error {
            Some(message) => Line::from(Span::styled(message.as_str(), theme.error_style())),
            None => Line::default(),
        };

        let lines = vec![Line::from(label), Line::from(input), error];
        frame.render_widget(Paragraph::new(lines).style(theme.panel_style()), area);
    }
}

/// Several named fields with keyboard focus.
#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<FormField>,
    focused: usize,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field. The first field added takes focus.
    pub fn with_field(mut self, mut field: FormField) -> Self {
        if self.fields.is_empty() {
            field.focus();
        }
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn focused_field(&self) -> Option<&FormField> {
        self.fields.get(self.focused)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focused)
    }

    /// Blur the focused field and move to the next one.
    pub fn focus_next(&mut self) {
        self.move_focus(1);
    }

    /// Blur the focused field and move to the previous one.
    pub fn focus_prev(&mut self) {
        self.move_focus(self.fields.len().saturating_sub(1));
    }

    fn move_focus(&mut self, step: usize) {
        if self.fields.is_empty() {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.focused) {
            field.handle_blur();
        }
        self.focused = (self.focused + step) % self.fields.len();
        self.fields[self.focused].focus();
    }

    /// Touch and validate every field. Returns whether all passed.
    pub fn validate_all(&mut self) -> bool {
        self.fields
            .iter_mut()
            .map(FormField::touch_and_validate)
            .fold(true, |all, ok| all && ok)
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(FormField::is_valid)
    }

    /// Visible errors as `(field name, message)`.
    pub fn errors(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .filter_map(|f| f.error().map(|e| (f.name(), e)))
            .collect()
    }

    /// Current values as `(field name, value)`.
    pub fn values(&self) -> Vec<(&str, &str)> {
        self.fields.iter().map(|f| (f.name(), f.value())).collect()
    }

    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
    }

    /// Route a key: Tab and BackTab move focus, everything else edits the focused field.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                true
            }
            KeyCode::BackTab => {
                self.focus_prev();
                true
            }
            _ => self
                .focused_field_mut()
                .is_some_and(|field| field.handle_key(key)),
        }
    }

    pub fn height(&self) -> u16 {
        self.fields.iter().map(FormField::height).sum()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut y = area.y;
        let bottom = area.y + area.height;
        for field in &self.fields {
            let height = field.height();
            if y + height > bottom {
                break;
            }
            field.render(frame, Rect::new(area.x, y, area.width, height), theme);
            y += height;
        }
    }
}
