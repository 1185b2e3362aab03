// src/ui/mod.rs

use crate::app::{App, View};
use ratatui::prelude::*;

mod layout;
mod widgets;

/// Draws the header, exactly one view, the footer and any pending alert on top.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let layout = layout::create_layout(area);

    widgets::header::render_header(frame, app, layout.header);

    match app.view {
        View::Submission => widgets::submission_view::render_submission_view(frame, app, layout.content),
        View::Scanning => widgets::scanning_view::render_scanning_view(frame, app, layout.content),
        View::Results => widgets::results_view::render_results_view(frame, app, layout.content),
    }

    widgets::footer::render_footer(frame, app, layout.footer);

    if let Some(alert) = &app.alert {
        widgets::alert_popup::render_alert_popup(frame, alert, area);
    }
}
