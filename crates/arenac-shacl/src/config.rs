//! Validator behavior knobs.

/// Configures how [`crate::evaluate::validate`] treats shapes it wasn't
/// strictly told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Reserved: promote `Info`-severity results to `Violation`.
    pub strict_mode: bool,
    /// SPARQL-based constraints; always `false` (SHACL-SPARQL is out of
    /// scope for this validator).
    pub enable_sparql: bool,
    /// Whether shapes with `sh:deactivated true` are still evaluated. SHACL
    /// proper always skips deactivated shapes; this exists for callers that
    /// want to dry-run a shape before turning it on.
    pub process_deactivated: bool,
    /// Whether a shape with no explicit `Closed` constraint is treated as
    /// closed anyway.
    pub closed_by_default: bool,
    /// Reserved: let the evaluator choose target-selection strategy per
    /// shape instead of always scanning by target class.
    pub optimize_targets: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            enable_sparql: false,
            process_deactivated: false,
            closed_by_default: false,
            optimize_targets: true,
        }
    }
}
