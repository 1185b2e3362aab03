// src/event.rs

use crate::core::client::DispatchError;
use crate::core::models::{AnalysisResult, ServiceStatus};

/// Events posted by background tasks into the main loop.
///
/// Every transition-scoped event carries the generation it was scheduled under,
/// so anything left over from an earlier run can be recognised and dropped.
#[derive(Debug)]
pub enum AppEvent {
    Dispatched {
        generation: u64,
        outcome: Result<AnalysisResult, DispatchError>,
    },
    ScanTick { generation: u64 },
    ScanSettled { generation: u64 },
    Reveal { generation: u64 },
    ScoreTick { generation: u64 },
    ConfidenceTick { generation: u64 },
    Health(ServiceStatus),
}

impl AppEvent {
    pub fn generation(&self) -> Option<u64> {
        match self {
            AppEvent::Dispatched { generation, .. }
            | AppEvent::ScanTick { generation }
            | AppEvent::ScanSettled { generation }
            | AppEvent::Reveal { generation }
            | AppEvent::ScoreTick { generation }
            | AppEvent::ConfidenceTick { generation } => Some(*generation),
            AppEvent::Health(_) => None,
        }
    }
}
