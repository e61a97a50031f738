use once_cell::sync::Lazy;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

use crate::types::TrendState;

/// Prometheus-tellere for trend-motoren.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    verdicts_total: IntCounterVec,
    logs_filtered_total: IntCounter,
}

static GLOBAL: Lazy<Metrics> = Lazy::new(Metrics::new);

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let verdicts_total = IntCounterVec::new(
            Opts::new("gymtrend_verdicts_total", "Trend verdicts produced, by state"),
            &["state"],
        )
        .expect("valid metric opts");
        let logs_filtered_total = IntCounter::new(
            "gymtrend_logs_filtered_total",
            "Logs dropped because they reduced to a non-positive value",
        )
        .expect("valid metric opts");

        registry
            .register(Box::new(verdicts_total.clone()))
            .expect("register verdicts_total");
        registry
            .register(Box::new(logs_filtered_total.clone()))
            .expect("register logs_filtered_total");

        Self { registry, verdicts_total, logs_filtered_total }
    }

    /// Prosess-global instans (brukes når motoren ikke får egne tellere).
    pub fn global() -> &'static Metrics {
        &GLOBAL
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_verdict(&self, state: TrendState) {
        self.verdicts_total.with_label_values(&[state.as_str()]).inc();
    }

    pub fn record_filtered(&self, n: usize) {
        self.logs_filtered_total.inc_by(n as u64);
    }

    pub fn verdicts(&self, state: TrendState) -> u64 {
        self.verdicts_total.with_label_values(&[state.as_str()]).get()
    }

    pub fn filtered(&self) -> u64 {
        self.logs_filtered_total.get()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_are_isolated_per_instance() {
        let a = Metrics::new();
        let b = Metrics::new();
        a.record_verdict(TrendState::Classified);
        a.record_filtered(3);
        assert_eq!(a.verdicts(TrendState::Classified), 1);
        assert_eq!(a.filtered(), 3);
        assert_eq!(b.verdicts(TrendState::Classified), 0);
        assert!(!a.registry().gather().is_empty());
    }
}
