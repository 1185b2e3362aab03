// src/ui/widgets/footer.rs

use crate::app::{App, View};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the footer widget, which displays available actions.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let spans = if app.alert.is_some() {
        Line::from(vec![key("Enter"), Span::raw(" to dismiss.")])
    } else {
        match app.view {
            View::Submission => {
                let analyze = if app.can_submit() {
                    key("Ctrl+S")
                } else {
                    Span::styled("Ctrl+S", Style::new().fg(Color::DarkGray))
                };
                Line::from(vec![
                    analyze,
                    Span::raw(" analyze, "),
                    key("Tab"),
                    Span::raw(" switch field, "),
                    key("Ctrl+R"),
                    Span::raw(" remove file, "),
                    key("Esc"),
                    Span::raw(" quit."),
                ])
            }
            View::Scanning => Line::from("Scanning... Press Q to quit."),
            View::Results => Line::from(vec![
                key("↑↓"),
                Span::raw(" indicators, "),
                key("[N]"),
                Span::raw("ew Analysis, "),
                key("[Q]"),
                Span::raw("uit"),
            ]),
        }
    };

    let footer = Paragraph::new(spans).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
