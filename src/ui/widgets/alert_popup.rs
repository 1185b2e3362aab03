// src/ui/widgets/alert_popup.rs

use crate::app::{Alert, AlertKind};
use crate::ui::layout::centered_rect;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Renders a blocking notification over the current view.
///
/// The popup is centered in `area` and framed in yellow for warnings and red
/// for errors. `Clear` wipes the popup area first so the view underneath does
/// not bleed through. Key handling, not this widget, keeps input blocked until
/// the alert is dismissed.
///
/// # Arguments
///
/// * `frame` - The mutable frame to render onto.
/// * `alert` - The notification to show.
/// * `area` - The full frame area; the popup takes 60% by 30% of it.
pub fn render_alert_popup(frame: &mut Frame, alert: &Alert, area: Rect) {
    let (title, color) = match alert.kind {
        AlertKind::Warning => ("Warning", Color::Yellow),
        AlertKind::Error => ("Error", Color::Red),
    };

    let text = Text::from(vec![
        Line::from(""),
        Line::from(alert.message.as_str()),
        Line::from(""),
        Line::from("Press ".bold() + "Enter".bold().yellow() + " to continue".bold()),
    ]);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let popup_area = centered_rect(60, 30, area);
    let popup = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}
