//! Error types for evolution resolution.
//!
//! Only programming errors in the integration layer and corrupt input data
//! are errors. "Does not evolve" and "not used as a passive" are ordinary
//! results and are reported through `Option` or empty collections instead.

use crate::ident::Identity;
use thiserror::Error;

/// Format an evolution cycle as a readable string.
fn format_cycle_path(path: &[Identity]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors that can occur while resolving formulas or loading data.
///
/// # Examples
///
/// ```rust
/// use evoformula::EvolutionError;
///
/// let err = EvolutionError::InvalidArgument("weapon".into());
/// assert_eq!(err.to_string(), "Invalid argument: weapon");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolutionError {
    /// A required entity was absent or blank.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A chain of formulas evolves back into one of its own weapons.
    ///
    /// The path starts and ends with the same weapon.
    #[error("Evolution cycle detected: {}", format_cycle_path(.path))]
    Cycle { path: Vec<Identity> },

    /// Layout configuration values are out of range.
    #[error("Invalid layout config: {0}")]
    InvalidConfig(String),

    /// Input data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for EvolutionError {
    fn from(err: serde_json::Error) -> Self {
        EvolutionError::Parse(err.to_string())
    }
}
