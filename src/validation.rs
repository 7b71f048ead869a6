//! Evolution validation results.
//!
//! An `EvolutionValidationResult` answers "can this weapon evolve with what
//! the player owns right now?" and lists what is still missing.

use serde::{Deserialize, Serialize};

/// Block reason for weapons that have no evolution at all.
pub const DOES_NOT_EVOLVE: &str = "Weapon does not evolve";

/// Outcome of an ownership-only evolvability check.
///
/// # Examples
///
/// ```rust
/// use evoformula::EvolutionValidationResult;
///
/// let mut result = EvolutionValidationResult::default();
/// result.add_missing("Clover", false);
/// let result = result.finish();
///
/// assert!(!result.can_evolve);
/// assert_eq!(result.block_reason.as_deref(), Some("Missing 1 passive(s)"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionValidationResult {
    pub can_evolve: bool,
    /// Display names of missing passives, in requirement order.
    pub missing_passives: Vec<String>,
    /// The subset of `missing_passives` that must also be max level.
    pub requires_max_level: Vec<String>,
    /// Absent when `can_evolve`.
    pub block_reason: Option<String>,
}

impl EvolutionValidationResult {
    /// Terminal result for a weapon with no evolution.
    pub fn does_not_evolve() -> Self {
        Self {
            can_evolve: false,
            block_reason: Some(DOES_NOT_EVOLVE.to_string()),
            ..Self::default()
        }
    }

    /// Record a missing passive.
    pub fn add_missing(&mut self, label: impl Into<String>, requires_max_level: bool) {
        let label = label.into();
        if requires_max_level {
            self.requires_max_level.push(label.clone());
        }
        self.missing_passives.push(label);
    }

    /// Settle `can_evolve` and `block_reason` from the missing list.
    pub fn finish(mut self) -> Self {
        if self.missing_passives.is_empty() {
            self.can_evolve = true;
            self.block_reason = None;
        } else {
            self.can_evolve = false;
            self.block_reason = Some(format!(
                "Missing {} passive(s)",
                self.missing_passives.len()
            ));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_does_not_evolve() {
        let result = EvolutionValidationResult::does_not_evolve();
        assert!(!result.can_evolve);
        assert_eq!(result.block_reason.as_deref(), Some(DOES_NOT_EVOLVE));
        assert!(result.missing_passives.is_empty());
        assert!(result.requires_max_level.is_empty());
    }

    #[test]
    fn test_finish_without_missing_can_evolve() {
        let result = EvolutionValidationResult::default().finish();
        assert!(result.can_evolve);
        assert!(result.block_reason.is_none());
    }

    #[test]
    fn test_max_level_is_subset_of_missing() {
        let mut result = EvolutionValidationResult::default();
        result.add_missing("Empty Tome", false);
        result.add_missing("Skull O'Maniac", true);
        let result = result.finish();

        assert_eq!(result.missing_passives, vec!["Empty Tome", "Skull O'Maniac"]);
        assert_eq!(result.requires_max_level, vec!["Skull O'Maniac"]);
        assert_eq!(result.block_reason.as_deref(), Some("Missing 2 passive(s)"));
    }
}
