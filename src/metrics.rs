//! Pick session metrics
//!
//! Counters and histograms go through the `metrics` facade. Nothing is
//! exported unless the host process installs a recorder.

use crate::tracker::ToggleOutcome;
use std::time::Instant;

pub const CATALOG_FETCH_SUCCESS: &str = "pickset_catalog_fetch_success_total";
pub const CATALOG_FETCH_ERROR: &str = "pickset_catalog_fetch_error_total";
pub const CATALOG_FETCH_DURATION: &str = "pickset_catalog_fetch_duration_seconds";
pub const CATALOG_SIZE: &str = "pickset_catalog_items";
pub const TOGGLES: &str = "pickset_toggles_total";
pub const SUBMISSION_SUCCESS: &str = "pickset_submission_success_total";
pub const SUBMISSION_ERROR: &str = "pickset_submission_error_total";
pub const SUBMISSION_REJECTED: &str = "pickset_submission_rejected_total";

/// Metrics collection for the pick session
pub struct PickMetrics;

impl PickMetrics {
    pub fn record_catalog_success(item_count: usize) {
        ::metrics::counter!(CATALOG_FETCH_SUCCESS).increment(1);
        ::metrics::histogram!(CATALOG_SIZE).record(item_count as f64);
    }

    pub fn record_catalog_error() {
        ::metrics::counter!(CATALOG_FETCH_ERROR).increment(1);
    }

    pub fn record_toggle(outcome: ToggleOutcome) {
        let label = match outcome {
            ToggleOutcome::Selected => "selected",
            ToggleOutcome::Deselected => "deselected",
            ToggleOutcome::Reassigned { .. } => "reassigned",
            ToggleOutcome::Locked { .. } => "locked",
        };
        ::metrics::counter!(TOGGLES, "outcome" => label).increment(1);
    }

    pub fn record_submission_success() {
        ::metrics::counter!(SUBMISSION_SUCCESS).increment(1);
    }

    pub fn record_submission_error() {
        ::metrics::counter!(SUBMISSION_ERROR).increment(1);
    }

    /// Submit attempted while the selection was incomplete
    pub fn record_submission_rejected() {
        ::metrics::counter!(SUBMISSION_REJECTED).increment(1);
    }
}

/// Records elapsed time into a histogram when dropped
pub struct TimingGuard {
    start: Instant,
    histogram_name: &'static str,
}

impl TimingGuard {
    pub fn new(histogram_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            histogram_name,
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        ::metrics::histogram!(self.histogram_name).record(self.start.elapsed().as_secs_f64());
    }
}

pub fn time_operation(histogram_name: &'static str) -> TimingGuard {
    TimingGuard::new(histogram_name)
}
