// src/ui/widgets/header.rs

use crate::app::App;
use crate::core::models::ServiceStatus;
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Title bar with the configured service and the result of the health check.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (status, style) = match app.service_status {
        ServiceStatus::Unknown => ("checking...", Style::default().fg(Color::DarkGray)),
        ServiceStatus::Operational => ("operational", Style::default().fg(Color::Green)),
        ServiceStatus::Unreachable => ("unreachable", Style::default().fg(Color::Red)),
    };

    let line = Line::from(vec![
        Span::styled("PhishScope", Style::new().bold().fg(Color::Cyan)),
        Span::raw("  Email Threat Analysis  "),
        Span::styled(app.service_url(), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
        Span::styled(format!("[{status}]"), style),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}
