//! Whole-pipeline configuration.

use arenac_graph::GraphConfig;
use arenac_mem::{ArenaConfig, InternerConfig};
use arenac_shacl::ValidatorConfig;
use arenac_telemetry::TelemetryConfig;
use arenac_turtle::ParserConfig;

/// Aggregates every component's configuration into one value, so an
/// embedding application can configure the whole pipeline at once or
/// override a single component's defaults.
///
/// ```
/// use arenac::ArenacConfig;
///
/// let config = ArenacConfig::default();
/// assert!(!config.arena.zero_on_alloc);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArenacConfig {
    /// The bump allocator's configuration.
    pub arena: ArenaConfig,
    /// The string interner's configuration.
    pub interner: InternerConfig,
    /// The triple store's configuration.
    pub graph: GraphConfig,
    /// The Turtle parser's configuration.
    pub parser: ParserConfig,
    /// The SHACL-subset validator's configuration.
    pub validator: ValidatorConfig,
    /// The telemetry hook's sampling and budget configuration. The sink
    /// itself is chosen separately at hook-construction time, since a sink
    /// is a boxed trait object and is not `Copy`.
    pub telemetry: TelemetryConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_aggregates_every_component_default() {
        let config = ArenacConfig::default();
        assert_eq!(config.arena, ArenaConfig::default());
        assert_eq!(config.telemetry, TelemetryConfig::default());
    }
}
