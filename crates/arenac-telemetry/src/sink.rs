//! Pluggable collectors for completed spans and metrics.
//!
//! This crate ships two sinks and depends on no real collector: a silent
//! [`NoopSink`] (the default, and what hot-path benches use) and a
//! [`ConsoleSink`] that prints through this crate's own [`crate::log`]
//! macros. An embedding application can implement [`TelemetrySink`] itself
//! to forward to OpenTelemetry or another real collector without this crate
//! ever depending on one.

use crate::span::{AttrValue, SpanStatus};

/// Receives completed spans and recorded metrics from a [`crate::hook::TelemetryHook`].
pub trait TelemetrySink {
    /// Called once a span completes, with its final attributes and status.
    fn on_span_end(&self, name: &str, attrs: &[(String, AttrValue)], status: SpanStatus, cycles: u64);

    /// Called for `metric_record_memory(used, total)`.
    fn on_metric_memory(&self, used: usize, total: usize);

    /// Called for `metric_record_violation(op, actual_cycles, threshold)`.
    fn on_metric_violation(&self, op: &str, actual_cycles: u64, threshold: u64);
}

/// A sink that discards everything; the default for hot-path use and for
/// tests that don't care about telemetry output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    fn on_span_end(&self, _name: &str, _attrs: &[(String, AttrValue)], _status: SpanStatus, _cycles: u64) {}
    fn on_metric_memory(&self, _used: usize, _total: usize) {}
    fn on_metric_violation(&self, _op: &str, _actual_cycles: u64, _threshold: u64) {}
}

/// A sink that logs through this crate's `info!`/`warn!` console macros.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl TelemetrySink for ConsoleSink {
    fn on_span_end(&self, name: &str, attrs: &[(String, AttrValue)], status: SpanStatus, cycles: u64) {
        crate::info!("span '{name}' ended status={status:?} cycles={cycles} attrs={attrs:?}");
    }

    fn on_metric_memory(&self, used: usize, total: usize) {
        crate::info!("memory {used}/{total} bytes");
    }

    fn on_metric_violation(&self, op: &str, actual_cycles: u64, threshold: u64) {
        crate::warn!("7-tick budget violated: '{op}' took {actual_cycles} cycles (budget {threshold})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_does_not_panic() {
        let sink = NoopSink;
        sink.on_span_end("x", &[], SpanStatus::Ok, 3);
        sink.on_metric_memory(1, 2);
        sink.on_metric_violation("alloc", 9, 7);
    }

    #[test]
    fn console_sink_does_not_panic() {
        let sink = ConsoleSink;
        sink.on_span_end("x", &[("k".to_owned(), AttrValue::Bool(true))], SpanStatus::Error, 10);
        sink.on_metric_memory(1, 2);
        sink.on_metric_violation("alloc", 9, 7);
    }
}
