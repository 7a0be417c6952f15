pub mod help_overlay;
pub mod item_list;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;

use crate::ops::filter::Filter;

use super::app::{App, Mode};

/// Main render function. Reads the app state, never changes it.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: bordered list | prompt row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    item_list::render_item_list(frame, app, chunks[0]);

    if app.mode == Mode::Help {
        help_overlay::render_help_overlay(frame, app, chunks[0]);
    }

    status_row::render_status_row(frame, app, chunks[1]);
}

/// Push spans for text with search match highlighting. If the filter matches
/// everything or finds nothing, pushes a single span with `base_style`.
/// Otherwise splits text at match boundaries.
pub(super) fn push_highlighted_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    text: &str,
    base_style: Style,
    highlight_style: Style,
    filter: &Filter,
) {
    let ranges = filter.match_ranges(text);
    if ranges.is_empty() {
        spans.push(Span::styled(text.to_string(), base_style));
        return;
    }

    let mut last_end = 0;
    for range in ranges {
        if range.start > last_end {
            spans.push(Span::styled(
                text[last_end..range.start].to_string(),
                base_style,
            ));
        }
        spans.push(Span::styled(
            text[range.start..range.end].to_string(),
            highlight_style,
        ));
        last_end = range.end;
    }
    if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
}
