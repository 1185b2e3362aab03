// src/timer.rs

//! Cancellable timers that post events back into the main loop.

use crate::event::AppEvent;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Owns a spawned timer task. Cancelling, replacing or dropping the handle aborts the task.
#[derive(Debug, Default)]
pub struct TaskHandle(Option<JoinHandle<()>>);

impl TaskHandle {
    pub fn is_active(&self) -> bool {
        self.0.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.abort();
        }
    }

    /// Cancels whatever was scheduled before and keeps `next` instead.
    pub fn replace(&mut self, next: TaskHandle) {
        self.cancel();
        *self = next;
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Sends `make_event()` every `period`, starting one period from now.
pub fn every<F>(period: Duration, tx: UnboundedSender<AppEvent>, make_event: F) -> TaskHandle
where
    F: Fn() -> AppEvent + Send + 'static,
{
    TaskHandle(Some(tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if tx.send(make_event()).is_err() {
                break;
            }
        }
    })))
}

/// Sends `event` once after `delay`.
pub fn after(delay: Duration, tx: UnboundedSender<AppEvent>, event: AppEvent) -> TaskHandle {
    TaskHandle(Some(tokio::spawn(async move {
        time::sleep(delay).await;
        let _ = tx.send(event);
    })))
}
