//! Panel refresh cycle
//!
//! Every dashboard panel owns one [`Panel`] that carries its last fetched
//! record and decides when the next fetch is due. A cycle runs
//! fetch → compare → reschedule:
//!
//! * a record whose aggregate differs from the cached one replaces it and
//!   reschedules at the panel's long interval,
//! * a record whose aggregate is numerically identical is dropped and the
//!   panel polls again after a short retry interval,
//! * an error is logged and swallowed, and the panel tries again after the
//!   long interval.
//!
//! Nothing here is fatal; a panel keeps showing its last good record until a
//! later fetch replaces it.

use std::time::{Duration, Instant};

use crate::data::FetchError;

/// How one refresh cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// New data accepted; the panel re-renders from it
    Rendered,
    /// Data numerically unchanged; render skipped
    Unchanged,
    /// Fetch or shape failed; last record kept
    Failed,
}

/// Refresh and retry spacing for one panel
#[derive(Debug, Clone, Copy)]
pub struct PanelIntervals {
    /// Normal spacing between fetches
    pub refresh: Duration,
    /// Spacing after an unchanged-skip, to poll again soon
    pub retry: Duration,
}

/// Per-panel cache and schedule
///
/// Mutated only from the owning panel's refresh cycle on the UI task; there
/// are no concurrent writers.
#[derive(Debug)]
pub struct Panel<T> {
    name: &'static str,
    intervals: PanelIntervals,
    record: Option<T>,
    /// `None` until the first cycle completes, which makes a fresh panel due
    /// immediately
    next_due: Option<Instant>,
    last_outcome: Option<RefreshOutcome>,
    last_error: Option<String>,
}

impl<T> Panel<T> {
    pub fn new(name: &'static str, intervals: PanelIntervals) -> Self {
        Self {
            name,
            intervals,
            record: None,
            next_due: None,
            last_outcome: None,
            last_error: None,
        }
    }

    /// Seeds the panel with a previously cached record. The panel is still
    /// due immediately, so stale data is replaced as soon as a fetch lands.
    pub fn with_record(name: &'static str, intervals: PanelIntervals, record: T) -> Self {
        Self {
            record: Some(record),
            ..Self::new(name, intervals)
        }
    }

    /// Last accepted record, if any cycle has produced one.
    pub fn record(&self) -> Option<&T> {
        self.record.as_ref()
    }

    #[allow(dead_code)]
    pub fn last_outcome(&self) -> Option<RefreshOutcome> {
        self.last_outcome
    }

    /// Message of the most recent failure, cleared by the next success.
    #[allow(dead_code)]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether the next fetch is due at `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.next_due {
            None => true,
            Some(due) => now >= due,
        }
    }

    /// Completes one refresh cycle and schedules the next.
    ///
    /// `unchanged` compares the cached record against the fresh one; it is
    /// only consulted when both exist. Errors are logged here and go no
    /// further.
    pub fn complete(
        &mut self,
        now: Instant,
        result: Result<T, FetchError>,
        unchanged: impl FnOnce(&T, &T) -> bool,
    ) -> RefreshOutcome {
        let outcome = match result {
            Ok(fresh) => match self.record.as_ref() {
                Some(prev) if unchanged(prev, &fresh) => {
                    self.next_due = Some(now + self.intervals.retry);
                    RefreshOutcome::Unchanged
                }
                _ => {
                    self.record = Some(fresh);
                    self.last_error = None;
                    self.next_due = Some(now + self.intervals.refresh);
                    RefreshOutcome::Rendered
                }
            },
            Err(err) => {
                log::error!("{}: refresh failed: {}", self.name, err);
                self.last_error = Some(err.to_string());
                self.next_due = Some(now + self.intervals.refresh);
                RefreshOutcome::Failed
            }
        };
        self.last_outcome = Some(outcome);
        outcome
    }
}
