//! Localization metrics for the HTTP service.
//!
//! Counters are kept by the service, never by the localization functions
//! themselves, which stay stateless.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Request counters shared by all handlers.
#[derive(Debug, Default)]
pub struct LocalizationMetrics {
    /// Records localized into a single language
    records_localized: AtomicUsize,

    /// Records returned untouched because they carried no translations
    passthroughs: AtomicUsize,

    /// Per-field localizations completed
    fields_localized: AtomicUsize,

    /// Requests where no acceptable language was found
    no_match: AtomicUsize,

    /// Requests that failed because the primary translation was missing
    missing_primary: AtomicUsize,
}

impl LocalizationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a whole-record localization.
    pub fn record_localized(&self) {
        self.records_localized.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a record without translations.
    pub fn record_passthrough(&self) {
        self.passthroughs.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a per-field localization.
    pub fn record_fields_localized(&self) {
        self.fields_localized.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request with no acceptable language.
    pub fn record_no_match(&self) {
        self.no_match.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request failing on a missing primary translation.
    pub fn record_missing_primary(&self) {
        self.missing_primary.fetch_add(1, Ordering::Relaxed);
    }

    pub fn records_localized(&self) -> usize {
        self.records_localized.load(Ordering::Relaxed)
    }

    pub fn passthroughs(&self) -> usize {
        self.passthroughs.load(Ordering::Relaxed)
    }

    pub fn fields_localized(&self) -> usize {
        self.fields_localized.load(Ordering::Relaxed)
    }

    pub fn no_match(&self) -> usize {
        self.no_match.load(Ordering::Relaxed)
    }

    pub fn missing_primary(&self) -> usize {
        self.missing_primary.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let localized = self.records_localized();
        let passthroughs = self.passthroughs();
        let fields = self.fields_localized();
        let no_match = self.no_match();
        let missing_primary = self.missing_primary();

        let succeeded = localized + passthroughs + fields;
        let total = succeeded + no_match + missing_primary;
        let success_rate = if total > 0 {
            (succeeded as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            records_localized: localized,
            passthroughs,
            fields_localized: fields,
            no_match,
            missing_primary,
            total_requests: total,
            success_rate,
        }
    }
}

/// Snapshot of the service counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub records_localized: usize,
    pub passthroughs: usize,
    pub fields_localized: usize,
    pub no_match: usize,
    pub missing_primary: usize,
    pub total_requests: usize,

    /// Share of requests that produced a result, as a percentage (0-100)
    pub success_rate: f64,
}
