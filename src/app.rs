// src/app.rs

use crate::core::animation::{
    ResultsDisplay, ScanProgress, CONFIDENCE_TICK, RESULTS_REVEAL_DELAY, SCAN_SETTLE, SCAN_TICK, SCORE_TICK,
};
use crate::core::client::{AnalysisClient, DispatchError};
use crate::core::input::{clean_pasted_path, InputCollector};
use crate::core::models::{AnalysisResult, ServiceStatus};
use crate::event::AppEvent;
use crate::timer::{self, TaskHandle};
use chrono::Local;
use ratatui::widgets::ScrollbarState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// The three mutually exclusive screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Submission,
    Scanning,
    Results,
}

/// Which submission field receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Text,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Error,
}

/// A blocking notification; input is swallowed until it is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Default)]
struct Timers {
    scan: TaskHandle,
    settle: TaskHandle,
    reveal: TaskHandle,
    score: TaskHandle,
    confidence: TaskHandle,
}

impl Timers {
    fn cancel_all(&mut self) {
        self.scan.cancel();
        self.settle.cancel();
        self.reveal.cancel();
        self.score.cancel();
        self.confidence.cancel();
    }

    fn any_active(&self) -> bool {
        [&self.scan, &self.settle, &self.reveal, &self.score, &self.confidence]
            .iter()
            .any(|t| t.is_active())
    }
}

pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub focus: Focus,
    pub input: InputCollector,
    pub alert: Option<Alert>,
    pub scan: ScanProgress,
    pub results: Option<ResultsDisplay>,
    pub service_status: ServiceStatus,
    /// Index of the first indicator shown in the results panel.
    pub indicator_scroll: usize,
    pub indicator_scroll_state: ScrollbarState,
    pending: Option<AnalysisResult>,
    generation: u64,
    timers: Timers,
    client: AnalysisClient,
    tx: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(client: AnalysisClient, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            should_quit: false,
            view: View::Submission,
            focus: Focus::default(),
            input: InputCollector::new(),
            alert: None,
            scan: ScanProgress::default(),
            results: None,
            service_status: ServiceStatus::Unknown,
            indicator_scroll: 0,
            indicator_scroll_state: ScrollbarState::default(),
            pending: None,
            generation: 0,
            timers: Timers::default(),
            client,
            tx,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn service_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn can_submit(&self) -> bool {
        self.view == View::Submission && self.input.has_active_selection()
    }

    pub fn has_running_timers(&self) -> bool {
        self.timers.any_active()
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Text => Focus::File,
            Focus::File => Focus::Text,
        };
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn warn_user(&mut self, message: String) {
        self.alert = Some(Alert { kind: AlertKind::Warning, message });
    }

    /// Fires the start-up `GET /health` check.
    pub fn check_health(&self) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let status = client.health().await;
            let _ = tx.send(AppEvent::Health(status));
        });
    }

    // --- Results view ---

    fn indicator_count(&self) -> usize {
        self.results.as_ref().map_or(0, |r| r.result.indicators.len())
    }

    pub fn scroll_up(&mut self) {
        self.indicator_scroll = self.indicator_scroll.saturating_sub(1);
        self.indicator_scroll_state = self.indicator_scroll_state.position(self.indicator_scroll);
    }

    /// Stops on the last indicator rather than scrolling past it.
    pub fn scroll_down(&mut self) {
        let last = self.indicator_count().saturating_sub(1);
        self.indicator_scroll = self.indicator_scroll.saturating_add(1).min(last);
        self.indicator_scroll_state = self.indicator_scroll_state.position(self.indicator_scroll);
    }

    fn reset_scroll(&mut self) {
        self.indicator_scroll = 0;
        self.indicator_scroll_state = ScrollbarState::new(self.indicator_count());
    }

    // --- Submission view ---

    /// Attaches the path currently in the file field.
    pub fn attach_file(&mut self) {
        if let Err(rejection) = self.input.attach_draft() {
            self.warn_user(rejection.to_string());
        }
    }

    pub fn remove_file(&mut self) {
        self.input.remove_file();
    }

    /// Bracketed paste: email text into the text field, a dropped file into the file field.
    pub fn paste(&mut self, pasted: &str) {
        match self.focus {
            Focus::Text => self.input.push_str(&pasted.replace("\r\n", "\n")),
            Focus::File => {
                self.input.set_path_draft(clean_pasted_path(pasted));
                self.attach_file();
            }
        }
    }

    /// Submission -> Scanning, and off goes the request.
    pub fn submit(&mut self) {
        if !self.can_submit() {
            return;
        }
        let Some(request) = self.input.active_request() else {
            return;
        };
        self.enter_scanning();

        let generation = self.generation;
        let client = self.client.clone();
        let tx = self.tx.clone();
        info!(generation, "Submitting email for analysis.");
        tokio::spawn(async move {
            let outcome = client.submit(&request).await;
            let _ = tx.send(AppEvent::Dispatched { generation, outcome });
        });
    }

    fn enter_scanning(&mut self) {
        self.generation += 1;
        self.timers.cancel_all();
        self.scan.reset();
        self.results = None;
        self.pending = None;
        self.view = View::Scanning;
    }

    fn return_to_submission(&mut self) {
        self.generation += 1;
        self.timers.cancel_all();
        self.scan.reset();
        self.results = None;
        self.pending = None;
        self.reset_scroll();
        self.view = View::Submission;
    }

    /// Results -> Submission with every input cleared.
    pub fn new_analysis(&mut self) {
        if self.view != View::Results {
            return;
        }
        self.return_to_submission();
        self.input.clear();
        self.focus = Focus::default();
        debug!("Started a new analysis.");
    }

    // --- Background events ---

    pub fn handle_event(&mut self, event: AppEvent) {
        if let Some(generation) = event.generation() {
            if generation != self.generation() {
                debug!(stale = generation, current = self.generation(), "Dropped stale event.");
                return;
            }
        }

        match event {
            AppEvent::Dispatched { outcome, .. } => {
                if self.view != View::Scanning {
                    return;
                }
                match outcome {
                    Ok(result) => self.start_scan_animation(result),
                    Err(e) => self.dispatch_failed(e),
                }
            }
            AppEvent::ScanTick { .. } => {
                // Only ticks once a verdict is in hand, and never past 100%.
                let scanning = self.view == View::Scanning && self.pending.is_some();
                if scanning && !self.scan.is_complete() && self.scan.tick() {
                    self.timers.scan.cancel();
                    let next = timer::after(
                        SCAN_SETTLE,
                        self.tx.clone(),
                        AppEvent::ScanSettled { generation: self.generation },
                    );
                    self.timers.settle.replace(next);
                }
            }
            AppEvent::ScanSettled { .. } => self.show_results(),
            AppEvent::Reveal { .. } => self.reveal_results(),
            AppEvent::ScoreTick { .. } => {
                if self.results.as_mut().is_some_and(|r| r.tick_score()) {
                    self.timers.score.cancel();
                }
            }
            AppEvent::ConfidenceTick { .. } => {
                if self.results.as_mut().is_some_and(|r| r.tick_confidence()) {
                    self.timers.confidence.cancel();
                }
            }
            AppEvent::Health(status) => {
                info!(?status, "Service health checkd.");
                self.service_status = status;
            }
        }
    }

    fn start_scan_animation(&mut self, result: AnalysisResult) {
        self.pending = Some(result);
        let generation = self.generation;
        let ticker = timer::every(SCAN_TICK, self.tx.clone(), move || AppEvent::ScanTick { generation });
        self.timers.scan.replace(ticker);
    }

    fn dispatch_failed(&mut self, error: DispatchError) {
        warn!(error = %error, "Returning to submission after a failed dispatch.");
        self.return_to_submission();
        self.alert = Some(Alert {
            kind: AlertKind::Error,
            message: error.user_message().to_string(),
        });
    }

    fn show_results(&mut self) {
        if self.view != View::Scanning || !self.scan.is_complete() {
            return;
        }
        let Some(result) = self.pending.take() else {
            return;
        };
        self.results = Some(ResultsDisplay::new(result, Local::now()));
        self.reset_scroll();
        self.view = View::Results;
        let reveal = timer::after(
            RESULTS_REVEAL_DELAY,
            self.tx.clone(),
            AppEvent::Reveal { generation: self.generation },
        );
        self.timers.reveal.replace(reveal);
    }

    fn reveal_results(&mut self) {
        let generation = self.generation;
        let Some(shown) = self.results.as_mut() else {
            return;
        };
        if shown.is_revealed() {
            return;
        }
        shown.reveal();
        debug!(
            score = shown.score().target(),
            confidence = shown.confidence().target(),
            severity = %shown.severity,
            "Revealing results."
        );
        let (score_done, confidence_done) = (shown.score().is_done(), shown.confidence().is_done());

        if !score_done {
            let ticker = timer::every(SCORE_TICK, self.tx.clone(), move || AppEvent::ScoreTick { generation });
            self.timers.score.replace(ticker);
        }
        if !confidence_done {
            let ticker =
                timer::every(CONFIDENCE_TICK, self.tx.clone(), move || AppEvent::ConfidenceTick { generation });
            self.timers.confidence.replace(ticker);
        }
    }
}
