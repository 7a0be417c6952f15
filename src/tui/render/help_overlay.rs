use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

enum HelpEntry {
    Header(&'static str),
    Binding(&'static str, &'static str),
    Blank,
}

use HelpEntry::{Binding, Blank, Header};

const HELP: &[HelpEntry] = &[
    Header(" Key Bindings"),
    Blank,
    Header(" List"),
    Binding(" \u{2191}\u{2193}/jk", "Move selection"),
    Binding(" PgUp/PgDn", "Move by a page"),
    Binding(" Home/g End/G", "First / last item"),
    Binding(" / Tab ^F", "Search (regular expression)"),
    Binding(" a", "Add a new item"),
    Binding(" A R", "Rename selected item"),
    Binding(" r", "Restart: set selected item to now"),
    Binding(" d", "Delete selected item"),
    Binding(" D", "Delete every item shown"),
    Binding(" h ?", "Toggle this help"),
    Binding(" q Esc ^C", "Quit"),
    Blank,
    Header(" Editing"),
    Binding(" Enter", "Accept"),
    Binding(" Esc", "Clear and leave"),
    Binding(" \u{2190}\u{2192}", "Move cursor"),
    Binding(" ^\u{2190} ^\u{2192}", "Move by word (also Alt+b/f)"),
    Binding(" Home/^A End/^E", "Start / end of line"),
    Binding(" Bksp/^H Del/^D", "Delete character"),
    Binding(" ^W Alt+Bksp", "Delete word before cursor"),
    Binding(" Alt+D ^Del", "Delete word after cursor"),
    Binding(" ^U", "Delete to start of line"),
    Blank,
    Header(" Search"),
    Binding(" Enter", "Keep the pattern and return to the list"),
    Binding(" Esc", "Clear the pattern"),
];

/// Number of lines in the help text
pub fn help_line_count() -> usize {
    HELP.len()
}

/// The help text as styled lines
pub fn help_lines(app: &App) -> Vec<Line<'static>> {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines = Vec::with_capacity(HELP.len());
    for entry in HELP {
        match entry {
            Header(text) => lines.push(Line::from(Span::styled(*text, header_style))),
            Binding(key, desc) => add_binding(&mut lines, key, desc, key_style, desc_style),
            Blank => lines.push(Line::from("")),
        }
    }
    lines
}

/// Render the help overlay (toggled with ? or h)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(70, 90, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(app.theme.background))
        .style(Style::default().bg(app.theme.background));
    let scroll = u16::try_from(app.help_scroll).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(help_lines(app))
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding(
    lines: &mut Vec<Line<'static>>,
    key: &'static str,
    desc: &'static str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 18;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, app_with, render_app};

    #[test]
    fn overlay_lists_bindings() {
        let mut app = app_with(&["coffee"]);
        app.mode = Mode::Help;
        let out = render_app(&app, TERM_W, TERM_H);
        assert!(out.contains("Key Bindings"));
        assert!(out.contains("Rename selected item"));
    }

    #[test]
    fn scrolling_hides_the_first_lines() {
        let mut app = app_with(&["coffee"]);
        app.mode = Mode::Help;
        app.help_scroll = 2;
        let out = render_app(&app, TERM_W, TERM_H);
        assert!(!out.contains("Key Bindings"));
        assert!(out.contains("Move selection"));
    }
}
