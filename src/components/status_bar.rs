use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::overlay::Overlay;
use crate::panel::Binding;
use crate::ui::{key_span, key_desc_span, Theme};

/// Status bar component (bottom of screen) - keybindings only
pub struct StatusBar;

impl StatusBar {
    /// Hints while an overlay holds the keyboard
    fn overlay_hints(overlay: &Overlay) -> Vec<(&'static str, &'static str)> {
        match overlay {
            Overlay::Form(_) => vec![("Tab", "next field"), ("Enter", "select"), ("Esc", "cancel")],
            Overlay::Error(_) => vec![("Enter", "close"), ("Esc", "close")],
            Overlay::State(_) => vec![],
            Overlay::Confirm(_) => vec![("y", "confirm"), ("n", "cancel")],
            Overlay::Filter(_) => vec![("Enter", "apply"), ("Esc", "clear")],
            Overlay::Search(_) => vec![("Enter", "pull"), ("Esc", "close")],
        }
    }

    pub fn render(frame: &mut Frame, area: Rect, overlay: Option<&Overlay>, bindings: &[Binding]) {
        let mut spans: Vec<Span> = Vec::new();

        match overlay {
            Some(overlay) => {
                for (key, desc) in Self::overlay_hints(overlay) {
                    spans.push(key_span(key));
                    spans.push(key_desc_span(desc));
                }
            }
            None => {
                for binding in bindings {
                    if let Some(desc) = binding.desc {
                        spans.push(key_span(&binding.key.label()));
                        spans.push(key_desc_span(desc));
                    }
                }
            }
        }

        let keys_line = Line::from(spans);
        let keys_widget = Paragraph::new(keys_line)
            .style(Style::default().bg(Theme::BG_DARK))
            .alignment(Alignment::Center);
        frame.render_widget(keys_widget, area);
    }
}
