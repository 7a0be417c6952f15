use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::tui::line_editor::LineEditor;
use crate::util::unicode::{char_offset_to_display_col, display_width};

const LIST_HINT: &str = "/ search  a add  A rename  r restart  d delete  ? help  q quit";

/// Render the prompt row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let prompt_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let pattern_color = if app.filter().is_valid() {
        app.theme.text_bright
    } else {
        app.theme.red
    };

    let mut spans: Vec<Span> = Vec::new();
    let mut cursor: Option<(&LineEditor, usize)> = None;
    let hint;

    match app.mode {
        Mode::List | Mode::Help => {
            // A pattern kept after search stays visible, dimmed
            if !app.pattern().is_empty() {
                spans.push(Span::styled("Search: ", Style::default().fg(app.theme.dim).bg(bg)));
                spans.push(Span::styled(
                    format!("/{}/", app.pattern()),
                    Style::default().fg(pattern_color).bg(bg),
                ));
            }
            hint = if app.config.ui.show_key_hints && app.mode == Mode::List {
                LIST_HINT
            } else {
                ""
            };
        }
        Mode::Search => {
            spans.push(Span::styled("Search: /", prompt_style));
            spans.push(Span::styled(
                app.search_editor.value().to_string(),
                Style::default().fg(pattern_color).bg(bg),
            ));
            spans.push(Span::styled("/", prompt_style));
            cursor = Some((&app.search_editor, "Search: /".len()));
            hint = "Enter keep  Esc clear";
        }
        Mode::AddNew => {
            spans.push(Span::styled("New: ", prompt_style));
            spans.push(Span::styled(
                app.add_editor.value().to_string(),
                Style::default().fg(app.theme.text).bg(bg),
            ));
            cursor = Some((&app.add_editor, "New: ".len()));
            hint = "Enter add  Esc cancel";
        }
        Mode::Rename => {
            spans.push(Span::styled("Rename: ", prompt_style));
            spans.push(Span::styled(
                app.rename_editor.value().to_string(),
                Style::default().fg(app.theme.text).bg(bg),
            ));
            cursor = Some((&app.rename_editor, "Rename: ".len()));
            hint = "Enter rename  Esc cancel";
        }
    }

    // A rejection message replaces the hint until the next key
    let (right, right_style) = match &app.message {
        Some(message) => (message.as_str(), Style::default().fg(app.theme.red).bg(bg)),
        None => (hint, Style::default().fg(app.theme.dim).bg(bg)),
    };
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let right_width = display_width(right);
    if !right.is_empty() && content_width + right_width < width {
        let padding = width - content_width - right_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(right, right_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);

    if let Some((editor, prefix)) = cursor {
        let col = prefix + char_offset_to_display_col(editor.value(), editor.cursor());
        let x = area.x + (col.min(width.saturating_sub(1)) as u16);
        frame.set_cursor_position(Position::new(x, area.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{TERM_W, app_with, render_to_string};

    fn status(app: &App) -> String {
        render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, app, area);
        })
    }

    #[test]
    fn list_mode_shows_hints() {
        let app = app_with(&["a"]);
        assert!(status(&app).ends_with("q quit"));
    }

    #[test]
    fn hints_can_be_turned_off() {
        let mut app = app_with(&["a"]);
        app.config.ui.show_key_hints = false;
        assert_eq!(status(&app), "");
    }

    #[test]
    fn search_prompt_wraps_pattern_in_slashes() {
        let mut app = app_with(&["a"]);
        app.mode = Mode::Search;
        app.search_editor.set_value("co.*e");
        assert!(status(&app).starts_with("Search: /co.*e/"));
    }

    #[test]
    fn invalid_pattern_is_drawn_in_red() {
        let mut app = app_with(&["a"]);
        app.mode = Mode::Search;
        app.search_editor.set_value("(");
        app.set_pattern("(");

        let backend = ratatui::backend::TestBackend::new(TERM_W, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_status_row(frame, &app, frame.area()))
            .unwrap();
        let cell = &terminal.backend().buffer()[(9, 0)];
        assert_eq!(cell.symbol(), "(");
        assert_eq!(cell.fg, app.theme.red);
    }

    #[test]
    fn kept_pattern_is_shown_in_list_mode() {
        let mut app = app_with(&["a"]);
        app.set_pattern("a");
        assert!(status(&app).starts_with("Search: /a/"));
    }

    #[test]
    fn edit_prompts() {
        let mut app = app_with(&["a"]);
        app.mode = Mode::AddNew;
        app.add_editor.set_value("tea");
        assert!(status(&app).starts_with("New: tea"));

        app.mode = Mode::Rename;
        app.rename_editor.set_value("coffee");
        assert!(status(&app).starts_with("Rename: coffee"));
    }

    #[test]
    fn message_replaces_hint() {
        let mut app = app_with(&["a"]);
        app.mode = Mode::AddNew;
        app.message = Some("item name is empty".into());
        assert!(status(&app).ends_with("item name is empty"));
    }
}
