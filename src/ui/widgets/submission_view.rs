// src/ui/widgets/submission_view.rs

use crate::app::{App, Focus};
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Renders the input screen: pasted email text on the left, `.eml` attachment on the right.
pub fn render_submission_view(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    render_text_input(frame, app, columns[0]);
    render_file_input(frame, app, columns[1]);
}

fn render_text_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Text;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title("Paste raw email")
        .title_bottom(Line::from(app.input.char_count_label()).right_aligned());

    let inner = block.inner(area);
    let lines: Vec<&str> = app.input.text().split('\n').collect();
    // Keep the tail in view once the text outgrows the box.
    let overflow = lines.len().saturating_sub(usize::from(inner.height.max(1)));
    let visible = lines[overflow..].join("\n");

    let paragraph = Paragraph::new(visible)
        .block(block)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(paragraph, area);

    if focused && app.alert.is_none() {
        let last = lines.last().copied().unwrap_or_default();
        let row = (lines.len() - overflow).saturating_sub(1) as u16;
        let col = (last.chars().count() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + col, inner.y + row));
    }
}

fn render_file_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::File;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let path_block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(focused))
        .title("Upload .eml (type or drop a path, Enter to attach)");
    let path_field = Paragraph::new(app.input.path_draft()).block(path_block);
    frame.render_widget(path_field, rows[0]);

    if focused && app.alert.is_none() {
        let col = (app.input.path_draft().chars().count() as u16).min(rows[0].width.saturating_sub(3));
        frame.set_cursor_position((rows[0].x + 1 + col, rows[0].y + 1));
    }

    let details = match app.input.file() {
        Some(file) => Text::from(vec![
            Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::styled(file.name.as_str(), Style::new().bold()),
            ]),
            Line::from(Span::styled(file.size_label(), Style::default().fg(Color::DarkGray))),
            Line::from(""),
            Line::from(Span::styled(
                "This file will be analyzed instead of any pasted text.",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        None => Text::from(vec![
            Line::from("No file selected."),
            Line::from(""),
            Line::from(Span::styled("Only .eml files are accepted.", Style::default().fg(Color::DarkGray))),
        ]),
    };
    let details_block = Block::default().borders(Borders::ALL).title("Selected file");
    frame.render_widget(
        Paragraph::new(details).block(details_block).wrap(Wrap { trim: true }),
        rows[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::AnalysisClient;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;
    use url::Url;

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_submission_view(f, app, f.area()))
            .unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_text_and_character_count() {
        let client = AnalysisClient::new(&Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(client, tx);
        app.input.push_str("Subject: prize");

        let content = render_to_string(&app);
        assert!(content.contains("Subject: prize"));
        assert!(content.contains("14 characters"));
        assert!(content.contains("No file selected."));
    }
}
