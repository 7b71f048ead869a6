//! Formula resolver module.
//!
//! Provides the `FormulaResolver` type, which turns a weapon plus an
//! ownership context into a resolved evolution formula or a validation
//! result. The resolver is stateless; reverse lookups live in
//! [`FormulaIndex`](crate::FormulaIndex).

use crate::context::OwnershipContext;
use crate::error::EvolutionError;
use crate::ident::IdSet;
use crate::model::{EvolutionFormula, PassiveRequirement, WeaponInfo};
use crate::validation::EvolutionValidationResult;

/// Resolves evolution formulas against what the player owns and has banned.
///
/// Two notions of evolvability are offered and deliberately kept apart:
/// [`resolve_formula`](Self::resolve_formula) treats a banned requirement as
/// blocking, while [`validate_evolution`](Self::validate_evolution) only looks
/// at ownership.
///
/// # Examples
///
/// ```rust
/// use evoformula::*;
///
/// let whip = WeaponInfo::new("WHIP", "Whip")
///     .evolves_into("BLOODY_TEAR")
///     .requires(PassiveRequirement::item("HOLLOW_HEART"));
///
/// let resolver = FormulaResolver::new();
/// let ctx = OwnershipContext::new().with_owned(["hollow_heart"]);
///
/// let formula = resolver.resolve_formula(&whip, &ctx).unwrap().unwrap();
/// assert!(formula.is_complete);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaResolver;

impl FormulaResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the evolution formula of `weapon`.
    ///
    /// Returns `Ok(None)` when the weapon does not evolve. The returned
    /// formula's `evolved_weapon` is left empty: the resolver only knows the
    /// target identifier, so the caller fills it in with a second lookup.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the weapon has a blank identifier.
    pub fn resolve_formula(
        &self,
        weapon: &WeaponInfo,
        ctx: &OwnershipContext,
    ) -> Result<Option<EvolutionFormula>, EvolutionError> {
        ensure_weapon(weapon)?;
        if !weapon.has_evolution() {
            return Ok(None);
        }
        Ok(Some(self.resolve_existing(&EvolutionFormula::new(weapon.clone()), ctx)))
    }

    /// Resolve an already-built formula (for example one taken from the
    /// index) against `ctx`, returning a copy with the derived fields set.
    ///
    /// The input formula is never modified.
    pub fn resolve_existing(
        &self,
        formula: &EvolutionFormula,
        ctx: &OwnershipContext,
    ) -> EvolutionFormula {
        let mut missing = Vec::new();
        let mut has_banned = false;

        for req in &formula.required_passives {
            let id = req.identity();
            if ctx.banned.contains_identity(id) {
                has_banned = true;
            }
            if !ctx.owned.contains_identity(id) {
                missing.push(req.clone());
            }
        }

        let mut resolved = formula.clone();
        resolved.is_complete = missing.is_empty() && !has_banned;
        resolved.missing_requirements = missing;
        resolved.has_banned_requirements = has_banned;
        resolved
    }

    /// Check whether `weapon` can evolve given only what is owned.
    ///
    /// Bans are not considered here.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the weapon has a blank identifier.
    pub fn validate_evolution(
        &self,
        weapon: &WeaponInfo,
        owned: &IdSet,
    ) -> Result<EvolutionValidationResult, EvolutionError> {
        ensure_weapon(weapon)?;
        if !weapon.has_evolution() {
            return Ok(EvolutionValidationResult::does_not_evolve());
        }

        let mut result = EvolutionValidationResult::default();
        for req in &weapon.required_passives {
            if !owned.contains_identity(req.identity()) {
                result.add_missing(req.label(), req.requires_max_level);
            }
        }
        Ok(result.finish())
    }

    /// The passives declared for `weapon`'s evolution, in declaration order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the weapon has a blank identifier.
    pub fn required_passives<'a>(
        &self,
        weapon: &'a WeaponInfo,
    ) -> Result<&'a [PassiveRequirement], EvolutionError> {
        ensure_weapon(weapon)?;
        Ok(&weapon.required_passives)
    }
}

fn ensure_weapon(weapon: &WeaponInfo) -> Result<(), EvolutionError> {
    if weapon.id.trim().is_empty() {
        return Err(EvolutionError::InvalidArgument(
            "weapon has no identifier".to_string(),
        ));
    }
    Ok(())
}
