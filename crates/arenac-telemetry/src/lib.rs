//! Cycle-budgeted span/metric telemetry hook, plus a small zero-dependency
//! console logging facade.
//!
//! The hook ([`TelemetryHook`]) is the structured interface other crates
//! instrument their hot paths with: `span_begin`/`span_set_attr`/`span_end`
//! bracket an operation, `metric_record_memory`/`metric_record_violation`
//! report point-in-time measurements, and every reading is checked against a
//! [`TelemetryConfig::tick_threshold`] cycle budget. Completed spans and
//! metrics are handed to a pluggable [`TelemetrySink`]; [`NoopSink`] is the
//! default for hot-path benches, [`ConsoleSink`] prints through this crate's
//! own logging macros.
//!
//! # Example
//!
//! ```
//! use arenac_telemetry::{TelemetryHook, TelemetryConfig, NoopSink, SpanStatus};
//!
//! let hook = TelemetryHook::new(TelemetryConfig::default(), NoopSink);
//! let span = hook.span_begin("arena.alloc", None);
//! hook.span_set_attr(span, "bytes", 64_i64);
//! hook.span_end(span, SpanStatus::Ok);
//! ```

pub mod config;
pub mod cycles;
pub mod hook;
pub mod log;
pub mod sink;
pub mod span;

pub use config::TelemetryConfig;
pub use cycles::read_cycles;
pub use hook::TelemetryHook;
pub use log::{get_logger, set_level, set_level_from_str, Level, Logger, __log_with_target};
pub use sink::{ConsoleSink, NoopSink, TelemetrySink};
pub use span::{AttrValue, SpanHandle, SpanStatus};
