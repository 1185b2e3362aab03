// src/ui/widgets/results_view.rs

use crate::app::App;
use crate::core::animation::{ResultsDisplay, GAUGE_ARC_LENGTH};
use crate::core::models::Indicator;
use ratatui::{
    prelude::*,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders, Gauge, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    },
};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Number of dots used to draw the full gauge circle.
const ARC_RESOLUTION: usize = 240;

/// Renders the results view.
///
/// The upper part shows the risk arc with its score counter next to the
/// severity badge, confidence bar and timestamp. The lower part lists the
/// indicators the service reported, scrolled to `app.indicator_scroll`.
/// Nothing is drawn until a verdict has been received.
///
/// # Arguments
///
/// * `frame` - The mutable frame to render onto.
/// * `app` - The application state holding the results and the indicator scroll position.
/// * `area` - The `Rect` in which to render this widget.
pub fn render_results_view(frame: &mut Frame, app: &App, area: Rect) {
    let Some(results) = &app.results else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[0]);

    render_risk_gauge(frame, results, columns[0]);
    render_summary(frame, results, columns[1]);
    render_indicators(frame, results, app.indicator_scroll, app.indicator_scroll_state, rows[1]);
}

/// Number of arc dots to paint for a stroke offset; the full arc length paints none.
fn filled_dots(arc_offset: f64) -> usize {
    let fraction = (1.0 - arc_offset / GAUGE_ARC_LENGTH).clamp(0.0, 1.0);
    (fraction * ARC_RESOLUTION as f64).round() as usize
}

/// Points along a circle starting at twelve o'clock and running clockwise.
fn arc_points(from: usize, to: usize) -> Vec<(f64, f64)> {
    (from..to)
        .map(|i| {
            let angle = FRAC_PI_2 - TAU * i as f64 / ARC_RESOLUTION as f64;
            (angle.cos(), angle.sin())
        })
        .collect()
}

fn render_risk_gauge(frame: &mut Frame, results: &ResultsDisplay, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Risk Score");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let color = results.severity.badge().color;
    let filled = filled_dots(results.arc_offset());
    let track = arc_points(filled, ARC_RESOLUTION);
    let arc = arc_points(0, filled);

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.3, 1.3])
        .y_bounds([-1.3, 1.3])
        .paint(move |ctx| {
            ctx.draw(&Points { coords: &track, color: Color::DarkGray });
            ctx.draw(&Points { coords: &arc, color });
        });
    frame.render_widget(canvas, rows[0]);

    let score = Paragraph::new(Line::from(vec![
        Span::styled(results.score().value().to_string(), Style::new().bold().fg(color)),
        Span::styled(" / 100", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(score, rows[1]);
}

fn render_summary(frame: &mut Frame, results: &ResultsDisplay, area: Rect) {
    let container = Block::default().borders(Borders::ALL).title("Assessment");
    let inner = container.inner(area);
    frame.render_widget(container, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Severity badge
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Confidence label
            Constraint::Length(1), // Confidence bar
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Details
        ])
        .split(inner);

    // --- Severity Badge ---
    let badge = results.severity.badge();
    let badge_text = Text::from(vec![
        Line::from("SEVERITY".bold()),
        Line::from(vec![
            Span::styled(format!("{} ", badge.icon), Style::default().fg(badge.color)),
            Span::styled(badge.label, Style::new().bold().fg(badge.color)),
        ]),
    ]);
    frame.render_widget(Paragraph::new(badge_text), chunks[0]);

    // --- Confidence ---
    let confidence = results.confidence().value();
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw("Confidence "),
            Span::styled(format!("{confidence}%"), Style::new().bold()),
        ])),
        chunks[2],
    );
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(u16::from(confidence))
            .label(""),
        chunks[3],
    );

    // --- Details ---
    let details = Text::from(vec![
        Line::from(vec![
            Span::styled("Analyzed at ", Style::default().fg(Color::DarkGray)),
            Span::raw(results.timestamp_label()),
        ]),
        Line::from(vec![
            Span::styled("Reported severity ", Style::default().fg(Color::DarkGray)),
            Span::raw(results.result.severity.as_deref().unwrap_or("(none)")),
        ]),
    ]);
    frame.render_widget(Paragraph::new(details), chunks[5]);
}

fn indicator_lines(indicator: &Indicator) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:>4} ", indicator.impact_label()), Style::new().bold().fg(Color::LightRed)),
        Span::styled(indicator.title(), Style::new().bold()),
        Span::styled(
            format!("  [{}]", indicator.category.as_deref().unwrap_or("uncategorised")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];
    if let Some(description) = indicator.description.as_deref() {
        lines.push(Line::from(Span::styled(
            format!("     {description}"),
            Style::default().fg(Color::Gray),
        )));
    }
    lines
}

fn render_indicators(frame: &mut Frame, results: &ResultsDisplay, scroll: usize, mut state: ScrollbarState, area: Rect) {
    let indicators = &results.result.indicators;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Indicators ({}) (scroll with ↑ ↓)", indicators.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let categories = &results.result.triggered_categories;
    let categories = if categories.is_empty() { "none".to_string() } else { categories.join(", ") };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Triggered categories ", Style::default().fg(Color::DarkGray)),
            Span::raw(categories),
        ])),
        rows[0],
    );

    if indicators.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No indicators reported.", Style::default().fg(Color::DarkGray))),
            rows[1],
        );
        return;
    }

    // Scrolling moves one indicator at a time, whatever its height.
    let mut lines = Vec::new();
    let mut first_line = 0;
    for (i, indicator) in indicators.iter().enumerate() {
        if i == scroll {
            first_line = lines.len();
        }
        lines.extend(indicator_lines(indicator));
    }
    let list = Paragraph::new(lines).scroll((first_line as u16, 0));
    frame.render_widget(list, rows[1]);

    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        rows[1],
        &mut state,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animation::gauge_offset;
    use crate::core::models::AnalysisResult;
    use chrono::Local;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(results: &ResultsDisplay) -> String {
        let backend = TestBackend::new(100, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(f.area());
                render_risk_gauge(f, results, columns[0]);
                render_summary(f, results, columns[1]);
            })
            .unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn arc_starts_at_twelve_o_clock() {
        let points = arc_points(0, 1);
        assert!(points[0].0.abs() < 1e-9);
        assert!((points[0].1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn shows_animated_values_and_badge() {
        let result = AnalysisResult {
            risk_score: Some(73.0),
            confidence: Some(91.0),
            severity: Some("High".into()),
            ..Default::default()
        };
        let mut display = ResultsDisplay::new(result, Local::now());
        display.reveal();
        while !display.tick_score() {}
        while !display.tick_confidence() {}

        let content = render(&display);
        assert!(content.contains("73 / 100"));
        assert!(content.contains("Confidence 91%"));
        assert!(content.contains("High"));
        assert!(content.contains(&display.timestamp_label()));
    }

    #[test]
    fn arc_fill_follows_the_stroke_offset() {
        assert_eq!(filled_dots(GAUGE_ARC_LENGTH), 0);
        assert_eq!(filled_dots(0.0), ARC_RESOLUTION);
        assert_eq!(filled_dots(gauge_offset(50.0)), ARC_RESOLUTION / 2);
    }

    fn render_indicator_panel(result: AnalysisResult, scroll: usize) -> String {
        let results = ResultsDisplay::new(result, Local::now());
        let state = ScrollbarState::new(results.result.indicators.len()).position(scroll);
        let backend = TestBackend::new(80, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_indicators(f, &results, scroll, state, f.area()))
            .unwrap();
        terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect()
    }

    fn spf_and_link() -> AnalysisResult {
        AnalysisResult {
            triggered_categories: vec!["authentication".into(), "links".into()],
            indicators: vec![
                Indicator {
                    title: Some("SPF failure".into()),
                    description: Some("Sender not authorised".into()),
                    category: Some("authentication".into()),
                    impact: Some(25.0),
                },
                Indicator {
                    title: Some("Mismatched link".into()),
                    category: Some("links".into()),
                    impact: Some(15.0),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn lists_indicators_and_categories() {
        let content = render_indicator_panel(spf_and_link(), 0);
        assert!(content.contains("Indicators (2)"));
        assert!(content.contains("authentication, links"));
        assert!(content.contains("+25 SPF failure"));
        assert!(content.contains("Sender not authorised"));
        assert!(content.contains("Mismatched link"));
    }

    #[test]
    fn scrolled_panel_starts_at_the_selected_indicator() {
        let content = render_indicator_panel(spf_and_link(), 1);
        assert!(!content.contains("SPF failure"));
        assert!(content.contains("Mismatched link"));
    }

    #[test]
    fn empty_indicator_list_says_so() {
        let content = render_indicator_panel(AnalysisResult::default(), 0);
        assert!(content.contains("No indicators reported."));
        assert!(content.contains("Triggered categories none"));
    }

    #[test]
    fn unknown_severity_renders_low() {
        let result = AnalysisResult { severity: Some("Unknown".into()), ..Default::default() };
        let content = render(&ResultsDisplay::new(result, Local::now()));
        assert!(content.contains("Low"));
        assert!(content.contains("0 / 100"));
    }
}
