use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::action::Action;
use crate::app::App;
use crate::components::text_input::{EditOutcome, Editable, TextInput};
use crate::error::{AppError, AppResult};
use crate::ui::{centered_modal, Theme};

/// Runs once when the form is dismissed, whichever way
pub type CloseFn = Box<dyn FnOnce(&mut App) -> AppResult<()> + Send>;

type Check = Box<dyn Fn(&str, &Form) -> bool + Send>;

/// Field rule. The check sees the field's value and the whole form, so it can
/// look at other fields.
pub struct Validator {
    message: String,
    check: Check,
}

impl Validator {
    pub fn new<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str, &Form) -> bool + Send + 'static,
    {
        Self {
            message: message.into(),
            check: Box::new(check),
        }
    }

    pub fn required(label: &str) -> Self {
        Self::new(format!("no specified {}", label), |value, _| !value.is_empty())
    }

    /// `label` must be filled in whenever `other` is
    pub fn required_with(label: &str, other: &'static str) -> Self {
        Self::new(format!("no specified {}", label), move |value, form| {
            !(value.is_empty() && !form.text(other).is_empty())
        })
    }

    pub fn port(label: &str) -> Self {
        Self::new(format!("invalid {}", label), |value, _| {
            value.is_empty() || value.parse::<u16>().is_ok()
        })
    }
}

pub enum FieldKind {
    Input(TextInput),
    CheckBox(bool),
    Select { options: Vec<String>, selected: usize },
}

pub struct Field {
    label: String,
    kind: FieldKind,
    validators: Vec<Validator>,
}

impl Field {
    fn new(label: &str, kind: FieldKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            validators: Vec::new(),
        }
    }

    pub fn validate(&mut self, validator: Validator) -> &mut Self {
        self.validators.push(validator);
        self
    }

    pub fn with_text(&mut self, text: impl Into<String>) -> &mut Self {
        if let FieldKind::Input(input) = &mut self.kind {
            input.set_text(text);
        }
        self
    }

    /// Current value as text (selected option for selects)
    pub fn value(&self) -> &str {
        match &self.kind {
            FieldKind::Input(input) => input.text(),
            FieldKind::Select { options, selected } => {
                options.get(*selected).map(String::as_str).unwrap_or("")
            }
            FieldKind::CheckBox(_) => "",
        }
    }
}

pub struct Button {
    label: String,
    action: Action,
}

/// What the app should do after a key went to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    None,
    Trigger(Action),
    Cancel,
}

/// Modal form: ordered fields, ordered buttons, one close callback
pub struct Form {
    title: String,
    fields: Vec<Field>,
    buttons: Vec<Button>,
    focus: usize,
    error: Option<String>,
    on_close: Option<CloseFn>,
}

impl Form {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fields: Vec::new(),
            buttons: Vec::new(),
            focus: 0,
            error: None,
            on_close: None,
        }
    }

    fn push(&mut self, field: Field) -> &mut Field {
        self.fields.push(field);
        let last = self.fields.len() - 1;
        &mut self.fields[last]
    }

    pub fn add_input(&mut self, label: &str) -> &mut Field {
        self.push(Field::new(label, FieldKind::Input(TextInput::default())))
    }

    pub fn add_checkbox(&mut self, label: &str) -> &mut Field {
        self.push(Field::new(label, FieldKind::CheckBox(false)))
    }

    pub fn add_select(&mut self, label: &str, options: &[&str]) -> &mut Field {
        let options = options.iter().map(|o| o.to_string()).collect();
        self.push(Field::new(label, FieldKind::Select { options, selected: 0 }))
    }

    pub fn add_button(&mut self, label: &str, action: Action) -> &mut Self {
        self.buttons.push(Button {
            label: label.to_string(),
            action,
        });
        self
    }

    pub fn on_close<F>(&mut self, f: F) -> &mut Self
    where
        F: FnOnce(&mut App) -> AppResult<()> + Send + 'static,
    {
        self.on_close = Some(Box::new(f));
        self
    }

    pub fn take_on_close(&mut self) -> Option<CloseFn> {
        self.on_close.take()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn field(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.label == label)
    }

    pub fn field_mut(&mut self, label: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.label == label)
    }

    /// Text of an input or selected option; empty for unknown labels
    pub fn text(&self, label: &str) -> &str {
        self.field(label).map(Field::value).unwrap_or("")
    }

    pub fn checked(&self, label: &str) -> bool {
        matches!(
            self.field(label).map(|f| &f.kind),
            Some(FieldKind::CheckBox(true))
        )
    }

    /// Run validators in field order; the first failure wins
    pub fn validate(&self) -> AppResult<()> {
        for field in &self.fields {
            for validator in &field.validators {
                if !(validator.check)(field.value(), self) {
                    return Err(AppError::Validation {
                        field: field.label.clone(),
                        message: validator.message.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn focus_count(&self) -> usize {
        self.fields.len() + self.buttons.len()
    }

    fn focus_next(&mut self) {
        if self.focus_count() > 0 {
            self.focus = (self.focus + 1) % self.focus_count();
        }
    }

    fn focus_prev(&mut self) {
        if self.focus_count() > 0 {
            self.focus = (self.focus + self.focus_count() - 1) % self.focus_count();
        }
    }

    fn focused_button(&self) -> Option<&Button> {
        self.focus
            .checked_sub(self.fields.len())
            .and_then(|i| self.buttons.get(i))
    }

    /// Move focus onto the button with `label`
    pub fn focus_button(&mut self, label: &str) {
        if let Some(i) = self.buttons.iter().position(|b| b.label == label) {
            self.focus = self.fields.len() + i;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => FormEvent::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                FormEvent::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                FormEvent::None
            }
            KeyCode::Enter => match self.focused_button() {
                Some(button) => FormEvent::Trigger(button.action),
                None => {
                    self.focus_next();
                    FormEvent::None
                }
            },
            _ => {
                self.edit(&key);
                FormEvent::None
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let height = self.fields.len() as u16 + 6;
        let modal_area = centered_modal(area, 60, height);

        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(Theme::CYAN).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::MODAL_BORDER))
            .style(Style::default().bg(Theme::MODAL_BG));

        let label_width = self.fields.iter().map(|f| f.label.len()).max().unwrap_or(0) + 1;

        let mut lines: Vec<Line> = Vec::new();
        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            let label_style = if focused {
                Style::default().fg(Theme::CYAN).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::FG_DARK)
            };

            let mut spans = vec![Span::styled(
                format!(" {:<width$} ", field.label, width = label_width),
                label_style,
            )];
            match &field.kind {
                FieldKind::Input(input) => spans.extend(input.spans(focused)),
                FieldKind::CheckBox(checked) => spans.push(Span::styled(
                    if *checked { "[x]" } else { "[ ]" },
                    Style::default().fg(Theme::FG),
                )),
                FieldKind::Select { .. } => spans.push(Span::styled(
                    format!("< {} >", field.value()),
                    Style::default().fg(Theme::YELLOW),
                )),
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::raw(""));

        let mut buttons = Vec::new();
        for (i, button) in self.buttons.iter().enumerate() {
            let style = if self.fields.len() + i == self.focus {
                Style::default().bg(Theme::MAUVE).fg(Theme::BG_DARK).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::FG)
            };
            buttons.push(Span::styled(format!(" {} ", button.label), style));
            buttons.push(Span::raw("  "));
        }
        lines.push(Line::from(buttons).alignment(Alignment::Center));

        if let Some(error) = &self.error {
            lines.push(Line::styled(format!(" {}", error), Style::default().fg(Theme::RED)));
        }

        frame.render_widget(Paragraph::new(lines).block(block), modal_area);
    }
}

impl Editable for Form {
    fn edit(&mut self, key: &KeyEvent) -> EditOutcome {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return EditOutcome::Ignored;
        };

        let outcome = match &mut field.kind {
            FieldKind::Input(input) => input.edit(key),
            FieldKind::CheckBox(checked) if key.code == KeyCode::Char(' ') => {
                *checked = !*checked;
                EditOutcome::Changed
            }
            FieldKind::Select { options, selected } if !options.is_empty() => match key.code {
                KeyCode::Left => {
                    *selected = (*selected + options.len() - 1) % options.len();
                    EditOutcome::Changed
                }
                KeyCode::Right | KeyCode::Char(' ') => {
                    *selected = (*selected + 1) % options.len();
                    EditOutcome::Changed
                }
                _ => EditOutcome::Ignored,
            },
            _ => EditOutcome::Ignored,
        };

        if outcome == EditOutcome::Changed {
            self.error = None;
        }
        outcome
    }
}
