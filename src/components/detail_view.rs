use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use crate::action::Action;
use crate::panel::{nav_bindings, Binding, KeyBinding, Panel, PanelName};
use crate::ui::{border_style, title_style, Theme};

/// Full-screen, scrollable inspect output
pub struct DetailView {
    pub title: String,
    lines: Vec<String>,
    pub scroll: usize,
    pub return_to: PanelName,
}

impl DetailView {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            lines: Vec::new(),
            scroll: 0,
            return_to: PanelName::Images,
        }
    }

    /// Replace the content with pretty-printed `value`
    pub fn show(
        &mut self,
        title: impl Into<String>,
        value: &serde_json::Value,
        return_to: PanelName,
    ) {
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        self.title = title.into();
        self.lines = text.lines().map(str::to_string).collect();
        self.scroll = 0;
        self.return_to = return_to;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for DetailView {
    fn name(&self) -> PanelName {
        PanelName::Detail
    }

    fn key_bindings(&self) -> Vec<Binding> {
        let mut bindings = vec![Binding::new(
            KeyBinding::key(KeyCode::Esc),
            Action::CloseDetail,
            "back",
        )];
        bindings.extend(nav_bindings());
        bindings
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(title_style(focused))
            .borders(Borders::ALL)
            .border_style(border_style(focused));

        let inner = block.inner(area);
        let visible_height = inner.height as usize;

        let visible: Vec<Line> = self
            .lines
            .iter()
            .skip(self.scroll)
            .take(visible_height)
            .map(|line| Line::styled(line.as_str(), Style::default().fg(Theme::FG)))
            .collect();

        frame.render_widget(Paragraph::new(visible).block(block), area);

        if self.lines.len() > visible_height {
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));

            let mut scrollbar_state = ScrollbarState::new(self.max_scroll()).position(self.scroll);

            frame.render_stateful_widget(
                scrollbar,
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }
    }

    fn navigate(&mut self, action: Action) {
        match action {
            Action::Up => self.scroll = self.scroll.saturating_sub(1),
            Action::Down => self.scroll = (self.scroll + 1).min(self.max_scroll()),
            Action::Top => self.scroll = 0,
            Action::Bottom => self.scroll = self.max_scroll(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scroll_is_bounded() {
        let mut view = DetailView::new();
        view.show("alpine", &json!({ "Id": "abc", "Size": 1 }), PanelName::Images);
        assert_eq!(view.lines().len(), 4);

        view.navigate(Action::Up);
        assert_eq!(view.scroll, 0);
        view.navigate(Action::Bottom);
        assert_eq!(view.scroll, 3);
        view.navigate(Action::Down);
        assert_eq!(view.scroll, 3);
    }
}
