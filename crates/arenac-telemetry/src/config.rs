//! Configuration surface for the telemetry hook.

/// Configures sampling and the 7-tick violation threshold.
///
/// The sink itself is not part of this `Copy` struct — see
/// [`crate::hook::TelemetryHook::new`] — since a sink is a boxed trait
/// object and so cannot itself be `Copy`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryConfig {
    /// Record 1 in `sample_rate` spans; `1` samples every span, `0` is
    /// treated as `1`.
    pub sample_rate: u32,
    /// Cycle count above which a wrapped operation is reported as a
    /// 7-tick budget violation.
    pub tick_threshold: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { sample_rate: 1, tick_threshold: 7 }
    }
}
