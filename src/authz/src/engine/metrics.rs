//! Decision counters for engine observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of the decision counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineMetrics {
    /// Decisions that reached a verdict
    pub total_decisions: u64,

    /// Granted by a check
    pub granted: u64,

    /// Denied by every check
    pub denied: u64,

    /// Granted because enforcement is disabled
    pub bypassed: u64,

    /// Decisions aborted by a configuration defect
    pub configuration_errors: u64,
}

impl EngineMetrics {
    /// Share of decisions that let the call proceed
    pub fn allow_rate(&self) -> f64 {
        if self.total_decisions == 0 {
            0.0
        } else {
            (self.granted + self.bypassed) as f64 / self.total_decisions as f64
        }
    }
}

/// Lock-free decision counters
#[derive(Debug, Default)]
pub struct MetricsCollector {
    granted: AtomicU64,
    denied: AtomicU64,
    bypassed: AtomicU64,
    configuration_errors: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_granted(&self) {
        self.granted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_denied(&self) {
        self.denied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_bypassed(&self) {
        self.bypassed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_configuration_error(&self) {
        self.configuration_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_metrics(&self) -> EngineMetrics {
        let granted = self.granted.load(Ordering::Relaxed);
        let denied = self.denied.load(Ordering::Relaxed);
        let bypassed = self.bypassed.load(Ordering::Relaxed);

        EngineMetrics {
            total_decisions: granted + denied + bypassed,
            granted,
            denied,
            bypassed,
            configuration_errors: self.configuration_errors.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.granted.store(0, Ordering::Relaxed);
        self.denied.store(0, Ordering::Relaxed);
        self.bypassed.store(0, Ordering::Relaxed);
        self.configuration_errors.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let collector = MetricsCollector::new();
        collector.record_granted();
        collector.record_granted();
        collector.record_denied();
        collector.record_bypassed();
        collector.record_configuration_error();

        let metrics = collector.get_metrics();
        assert_eq!(metrics.total_decisions, 4);
        assert_eq!(metrics.granted, 2);
        assert_eq!(metrics.configuration_errors, 1);
        assert_eq!(metrics.allow_rate(), 0.75);
    }

    #[test]
    fn test_empty_allow_rate() {
        let collector = MetricsCollector::new();
        assert_eq!(collector.get_metrics().allow_rate(), 0.0);

        collector.record_denied();
        collector.reset();
        assert_eq!(collector.get_metrics(), EngineMetrics::default());
    }
}
