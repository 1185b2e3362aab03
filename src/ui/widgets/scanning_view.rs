// src/ui/widgets/scanning_view.rs

use crate::app::App;
use crate::core::animation::SCAN_STEPS;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

/// Renders the scanning animation: a progress bar, the current stage message and the five steps.
pub fn render_scanning_view(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("Scanning ({}/{} stages)", app.scan.highlighted_steps(), SCAN_STEPS.len());
    let main_block = Block::default().borders(Borders::ALL).title(title);
    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Stage message
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Progress bar
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Steps
        ])
        .split(inner_area);

    let message = Paragraph::new(Line::from(vec![
        Span::styled("» ", Style::default().fg(Color::Cyan)),
        Span::raw(app.scan.message()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(message, chunks[0]);

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(u16::from(app.scan.percent()))
        .label(format!("{}%", app.scan.percent()));
    frame.render_widget(progress, chunks[2]);

    let steps: Vec<Line> = SCAN_STEPS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if app.scan.is_step_highlighted(i) {
                Line::from(vec![
                    Span::styled("  ● ", Style::default().fg(Color::Cyan)),
                    Span::styled(*name, Style::new().bold()),
                ])
            } else {
                Line::from(vec![
                    Span::styled("  ○ ", Style::default().fg(Color::DarkGray)),
                    Span::styled(*name, Style::default().fg(Color::DarkGray)),
                ])
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(steps), chunks[4]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::AnalysisClient;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;
    use url::Url;

    #[test]
    fn shows_progress_and_highlighted_steps() {
        let client = AnalysisClient::new(&Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(client, tx);
        for _ in 0..45 {
            app.scan.tick();
        }

        let backend = TestBackend::new(80, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_scanning_view(f, &app, f.area())).unwrap();
        let content: String = terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect();

        assert!(content.contains("45%"));
        assert!(content.contains("Inspecting URLs and content..."));
        assert_eq!(content.matches('●').count(), 3);
        assert_eq!(content.matches('○').count(), 2);
    }
}
