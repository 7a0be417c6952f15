use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ops::since::since_label;
use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

use super::help_overlay::help_lines;
use super::push_highlighted_spans;

/// First and one-past-last row of the view to draw so that `index` stays
/// visible. Keeps the selection centered once the list is scrolled.
pub fn visible_window(len: usize, index: usize, height: usize) -> (usize, usize) {
    if len <= height {
        return (0, len);
    }
    let from = index.saturating_sub(height / 2).min(len - height);
    (from, from + height)
}

/// Render the bordered item list. An empty view shows the key bindings.
pub fn render_item_list(frame: &mut Frame, app: &App, area: Rect) {
    render_item_list_at(frame, app, area, Utc::now());
}

pub(super) fn render_item_list_at(frame: &mut Frame, app: &App, area: Rect, now: DateTime<Utc>) {
    let bg = app.theme.background;
    let count = format!(" {}/{} ", app.filtered().len(), app.store.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            " timetrack ",
            Style::default()
                .fg(app.theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ))
        .title_top(
            Line::from(Span::styled(count, Style::default().fg(app.theme.dim))).right_aligned(),
        )
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.filtered().is_empty() {
        let paragraph = Paragraph::new(help_lines(app)).style(Style::default().bg(bg));
        frame.render_widget(paragraph, inner);
        return;
    }

    let width = inner.width as usize;
    let height = inner.height as usize;
    let view = app.filtered();
    let selected = app.selection.index();
    let (from, to) = visible_window(view.len(), selected.unwrap_or(0), height);

    let match_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);

    let mut lines: Vec<Line> = Vec::with_capacity(to - from);
    for (row, id) in view[from..to].iter().enumerate() {
        let Some(item) = app.item(*id) else {
            continue;
        };
        let is_selected = selected == Some(from + row);
        let row_bg = if is_selected { app.theme.selection_bg } else { bg };
        let name_style = if is_selected {
            Style::default()
                .fg(app.theme.selection_fg)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };

        let label = since_label(item.since, now);
        let label_width = display_width(&label);
        // One column of space always separates name and label
        let name = truncate_to_width(&item.name, width.saturating_sub(label_width + 1));
        let name_width = display_width(&name);

        let mut spans = Vec::new();
        push_highlighted_spans(&mut spans, &name, name_style, match_style, app.filter());
        let padding = width.saturating_sub(name_width + label_width);
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(row_bg)));
        spans.push(Span::styled(
            label,
            Style::default().fg(app.theme.since).bg(row_bg),
        ));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, app_with_items, render_to_string};
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn window_fits_without_scrolling() {
        assert_eq!(visible_window(3, 2, 10), (0, 3));
        assert_eq!(visible_window(0, 0, 10), (0, 0));
    }

    #[test]
    fn window_centers_then_pins_to_end() {
        assert_eq!(visible_window(100, 0, 10), (0, 10));
        assert_eq!(visible_window(100, 4, 10), (0, 10));
        assert_eq!(visible_window(100, 50, 10), (45, 55));
        assert_eq!(visible_window(100, 99, 10), (90, 100));
    }

    #[test]
    fn rows_show_name_and_elapsed_time() {
        let app = app_with_items(vec![
            ("coffee", now() - TimeDelta::minutes(90)),
            ("gym", now() - TimeDelta::days(2) - TimeDelta::seconds(5)),
        ]);
        let out = render_to_string(40, 5, |frame, area| {
            render_item_list_at(frame, &app, area, now());
        });
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains(" timetrack "));
        assert!(lines[0].contains(" 2/2 "));
        assert_eq!(lines[1], format!("│coffee{}01:30:00│", " ".repeat(24)));
        assert_eq!(lines[2], format!("│gym{}2d 00:00:05│", " ".repeat(24)));
    }

    #[test]
    fn long_names_are_truncated_before_the_label() {
        let long = "a very long item name that will not fit in the row";
        let app = app_with_items(vec![(long, now())]);
        let out = render_to_string(30, 3, |frame, area| {
            render_item_list_at(frame, &app, area, now());
        });
        let row = out.lines().nth(1).unwrap();
        assert!(row.contains("00:00:00"));
        assert!(!row.contains("fit in the row"));
    }

    #[test]
    fn empty_view_shows_key_bindings() {
        let mut app = app_with_items(vec![("coffee", now())]);
        app.set_pattern("nothing matches this");
        let out = render_to_string(TERM_W, 20, |frame, area| {
            render_item_list_at(frame, &app, area, now());
        });
        assert!(out.contains("0/1"));
        assert!(out.contains("Key Bindings"));
    }
}
