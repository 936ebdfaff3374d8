use std::path::PathBuf;

use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, StatefulWidget, Widget, Wrap};

use super::timestamps::format_timestamp;
use crate::models::SearchMode;
use crate::utils::format_path_with_tilde;

const LABEL_WIDTH: usize = 16;

/// Snapshot of the index state shown by [`SettingsWidget`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub bookmark_path: Option<PathBuf>,
    pub search_mode: SearchMode,
    pub entry_count: usize,
    pub indexed_at: Option<DateTime<Utc>>,
}

/// Bordered panel listing the bookmarks file, search mode, entry count and
/// last indexing time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsWidget {
    border_style: Style,
    label_style: Style,
    value_style: Style,
}

impl SettingsWidget {
    /// Rows needed to show every line without clipping
    pub const HEIGHT: u16 = 6;

    pub fn new() -> Self {
        Self {
            border_style: Style::default().fg(Color::Rgb(113, 113, 122)),
            label_style: Style::default().fg(Color::Rgb(113, 113, 122)),
            value_style: Style::default()
                .fg(Color::Rgb(250, 250, 250))
                .add_modifier(Modifier::BOLD),
        }
    }

    fn lines(&self, view: &SettingsView) -> Vec<Line<'static>> {
        let path = view
            .bookmark_path
            .as_deref()
            .map(format_path_with_tilde)
            .unwrap_or_else(|| "(not set)".to_string());
        let indexed =
            view.indexed_at.as_ref().map(format_timestamp).unwrap_or_else(|| "never".to_string());

        vec![
            self.line("Bookmarks file:", path),
            self.line("Search mode:", view.search_mode.to_string()),
            self.line("Bookmarks:", view.entry_count.to_string()),
            self.line("Last indexed:", indexed),
        ]
    }

    fn line(&self, label: &str, value: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), self.label_style),
            Span::styled(value, self.value_style),
        ])
    }

    /// Render into an off-screen buffer and return its rows as plain text
    ///
    /// Used when output is not a terminal. Trailing spaces are trimmed.
    pub fn render_to_lines(&self, view: &SettingsView, width: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, Self::HEIGHT);
        let mut buffer = Buffer::empty(area);
        let mut state = view.clone();
        StatefulWidget::render(self, area, &mut buffer, &mut state);

        (0..area.height)
            .map(|y| {
                let row: String = (0..area.width).map(|x| buffer[(x, y)].symbol()).collect();
                row.trim_end().to_string()
            })
            .collect()
    }
}

impl Default for SettingsWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl StatefulWidget for &SettingsWidget {
    type State = SettingsView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style)
            .title(" Bookmark Index ");

        Paragraph::new(self.lines(state)).block(block).wrap(Wrap { trim: false }).render(area, buf);
    }
}
