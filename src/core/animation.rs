// src/core/animation.rs

//! Tick-driven models behind the scanning and results animations.
//!
//! Nothing here owns a timer. The app schedules ticks and feeds them in, which
//! keeps every frame of the animation reproducible in tests.

use crate::core::models::{AnalysisResult, Severity};
use chrono::{DateTime, Local};
use std::time::Duration;

pub const SCAN_TICK: Duration = Duration::from_millis(40);
pub const SCAN_SETTLE: Duration = Duration::from_millis(500);
pub const RESULTS_REVEAL_DELAY: Duration = Duration::from_millis(300);
pub const SCORE_TICK: Duration = Duration::from_millis(15);
pub const CONFIDENCE_TICK: Duration = Duration::from_millis(10);

/// Circumference of the risk gauge arc, in gauge units.
pub const GAUGE_ARC_LENGTH: f64 = 283.0;

pub const SCAN_STEPS: [&str; 5] = [
    "Email structure",
    "Authentication",
    "URLs & content",
    "Threat intelligence",
    "Risk assessment",
];

const WAITING_MESSAGE: &str = "Submitting to analysis service...";

/// Progress of the decorative scanning sequence.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanProgress {
    percent: u8,
    next_step: usize,
}

impl ScanProgress {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances one tick. Returns `true` once 100% is reached.
    pub fn tick(&mut self) -> bool {
        if self.percent < 100 {
            self.percent += 1;
        }
        // Step N lights up once progress passes N * 20, one step per tick at most.
        if self.next_step < SCAN_STEPS.len() && usize::from(self.percent) > self.next_step * 20 {
            self.next_step += 1;
        }
        self.is_complete()
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100
    }

    pub fn highlighted_steps(&self) -> usize {
        self.next_step
    }

    pub fn is_step_highlighted(&self, index: usize) -> bool {
        index < self.next_step
    }

    pub fn message(&self) -> &'static str {
        match self.percent {
            0 => WAITING_MESSAGE,
            1..=19 => "Parsing email structure...",
            20..=39 => "Analyzing authentication headers...",
            40..=59 => "Inspecting URLs and content...",
            60..=79 => "Correlating threat intelligence...",
            _ => "Finalizing risk assessment...",
        }
    }
}

/// Integer counter that climbs by one per tick and stops exactly on its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    value: u8,
    target: u8,
}

impl Counter {
    pub fn new(target: f64) -> Self {
        Self { value: 0, target: clamp_percent(target).round() as u8 }
    }

    /// Returns `true` when the target has been reached.
    pub fn tick(&mut self) -> bool {
        if self.value < self.target {
            self.value += 1;
        }
        self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.value >= self.target
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn target(&self) -> u8 {
        self.target
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 100.0) }
}

/// Stroke offset of the risk arc for a given score: full length means empty.
pub fn gauge_offset(score: f64) -> f64 {
    GAUGE_ARC_LENGTH - GAUGE_ARC_LENGTH * clamp_percent(score) / 100.0
}

/// Everything the results view shows, animated from zero toward the received verdict.
#[derive(Debug, Clone)]
pub struct ResultsDisplay {
    pub result: AnalysisResult,
    pub severity: Severity,
    pub shown_at: DateTime<Local>,
    arc_offset: f64,
    score: Counter,
    confidence: Counter,
    revealed: bool,
}

impl ResultsDisplay {
    pub fn new(result: AnalysisResult, shown_at: DateTime<Local>) -> Self {
        Self {
            severity: result.severity(),
            score: Counter::new(result.risk_score()),
            confidence: Counter::new(result.confidence()),
            arc_offset: GAUGE_ARC_LENGTH,
            revealed: false,
            shown_at,
            result,
        }
    }

    /// Moves the arc to its target; the counters start ticking after this.
    pub fn reveal(&mut self) {
        self.revealed = true;
        self.arc_offset = gauge_offset(self.result.risk_score());
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn tick_score(&mut self) -> bool {
        self.score.tick()
    }

    pub fn tick_confidence(&mut self) -> bool {
        self.confidence.tick()
    }

    pub fn score(&self) -> &Counter {
        &self.score
    }

    pub fn confidence(&self) -> &Counter {
        &self.confidence
    }

    /// Current stroke offset of the risk arc; `GAUGE_ARC_LENGTH` until revealed.
    pub fn arc_offset(&self) -> f64 {
        self.arc_offset
    }

    pub fn timestamp_label(&self) -> String {
        self.shown_at.format("%H:%M:%S").to_string()
    }
}
