// View lifecycle for the power curve screen
use crate::application::curve_service::QueryOutcome;
use crate::domain::curve::PowerCurve;

pub const NOT_FOUND_BANNER: &str = "Data does not exist in selected time range.";

/// One state value instead of a bag of independent flags, so the view
/// can never show a contradictory combination (e.g. a chart behind a
/// not-found banner).
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Idle,
    Loading,
    Loaded { curve: PowerCurve, skipped: usize },
    NotFound,
    Failed(String),
}

/// The screen's query lifecycle. Every attempt gets a monotonically
/// increasing sequence number; a completion is applied only if it
/// belongs to the latest issued attempt, so a slow stale response can
/// never overwrite a newer one.
#[derive(Debug)]
pub struct CurveView {
    state: ViewState,
    latest_seq: u64,
}

impl CurveView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading)
    }

    /// Start a new attempt and return its sequence number.
    pub fn begin(&mut self) -> u64 {
        self.latest_seq += 1;
        self.state = ViewState::Loading;
        self.latest_seq
    }

    /// Apply a completed attempt. Returns false when the completion was
    /// stale and discarded.
    pub fn apply(&mut self, seq: u64, outcome: QueryOutcome) -> bool {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "discarding stale query completion");
            return false;
        }
        self.state = match outcome {
            QueryOutcome::Curve { curve, skipped } => ViewState::Loaded { curve, skipped },
            QueryOutcome::NotFound => ViewState::NotFound,
            QueryOutcome::Failed(reason) => ViewState::Failed(reason),
        };
        true
    }

    /// Dismiss a banner (Esc). Loading and loaded states are untouched.
    pub fn dismiss(&mut self) {
        if matches!(self.state, ViewState::NotFound | ViewState::Failed(_)) {
            self.state = ViewState::Idle;
        }
    }
}

impl Default for CurveView {
    fn default() -> Self {
        Self::new()
    }
}
