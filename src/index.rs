//! Formula index module.
//!
//! Provides `FormulaIndex`, a read-only multi-index over a formula
//! collection. The index is built once from a complete snapshot and is then
//! replaced wholesale whenever the source data changes; it never revalidates
//! itself, so keeping it fresh is the caller's job.

use crate::ident::Identity;
use crate::model::{EvolutionFormula, PassiveSource, WeaponInfo};
use std::collections::HashMap;

/// Reverse-lookup cache over every known evolution formula.
///
/// Formulas live in a single arena in source order; the lookup tables hold
/// arena positions:
///
/// - base weapon → formula
/// - evolved weapon → formula
/// - passive (weapon or item) → every formula requiring it
///
/// All keys are case-insensitive [`Identity`] values. Each base weapon has
/// at most one formula; if the input names a base weapon twice the later
/// formula replaces the earlier one and a warning is logged. An evolved
/// weapon with several producers (dual-weapon evolutions) resolves to the
/// first producer.
///
/// The index is immutable after [`build`](Self::build), so it can be shared
/// across threads behind an `Arc` without locking.
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
/// let index = FormulaIndex::build(vec![EvolutionFormula::new(whip)]);
///
/// assert!(index.get_for_weapon("whip").is_some());
/// assert!(index.get_for_evolved_weapon("BLOODY_TEAR").is_some());
/// assert_eq!(index.count_passive_usages("hollow_heart"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormulaIndex {
    formulas: Vec<EvolutionFormula>,
    by_base: HashMap<Identity, usize>,
    by_evolved: HashMap<Identity, usize>,
    by_passive: HashMap<Identity, Vec<usize>>,
}

impl FormulaIndex {
    /// Create an empty index. Every query on it reports nothing found.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from a complete formula collection.
    ///
    /// A later formula for an already-seen base weapon replaces the earlier
    /// one and takes the later position, so surviving formulas stay in source
    /// order. When two formulas produce the same evolved weapon, the first
    /// one owns the reverse lookup.
    pub fn build(formulas: impl IntoIterator<Item = EvolutionFormula>) -> Self {
        let mut staged: Vec<Option<EvolutionFormula>> = Vec::new();
        let mut latest: HashMap<Identity, usize> = HashMap::new();

        for formula in formulas {
            let base = formula.base_identity();
            if base.is_blank() {
                tracing::warn!("skipping formula with a blank base weapon");
                continue;
            }
            if let Some(old) = latest.insert(base.clone(), staged.len()) {
                tracing::warn!(
                    base = %base,
                    "duplicate formula for base weapon, keeping the later one"
                );
                staged[old] = None;
            }
            staged.push(Some(formula));
        }
        let arena: Vec<EvolutionFormula> = staged.into_iter().flatten().collect();

        let mut by_base = HashMap::new();
        let mut by_evolved: HashMap<Identity, usize> = HashMap::new();
        let mut by_passive: HashMap<Identity, Vec<usize>> = HashMap::new();
        for (slot, formula) in arena.iter().enumerate() {
            by_base.insert(formula.base_identity(), slot);
            if let Some(evolved) = formula.evolved_identity() {
                match by_evolved.get(&evolved) {
                    Some(&first) => tracing::warn!(
                        evolved = %evolved,
                        kept = %arena[first].base_weapon.id,
                        ignored = %formula.base_weapon.id,
                        "several formulas produce the same weapon, keeping the first"
                    ),
                    None => {
                        by_evolved.insert(evolved, slot);
                    }
                }
            }
            for req in &formula.required_passives {
                let usages = by_passive.entry(req.identity().clone()).or_default();
                if usages.last() != Some(&slot) {
                    usages.push(slot);
                }
            }
        }

        tracing::debug!(
            formulas = arena.len(),
            evolved = by_evolved.len(),
            passives = by_passive.len(),
            "built formula index"
        );

        Self {
            formulas: arena,
            by_base,
            by_evolved,
            by_passive,
        }
    }

    /// Number of indexed formulas.
    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    /// Whether the index holds no formulas.
    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    /// All indexed formulas in source order.
    pub fn formulas(&self) -> impl Iterator<Item = &EvolutionFormula> {
        self.formulas.iter()
    }

    /// The formula whose base weapon is `weapon_id`.
    pub fn get_for_weapon(&self, weapon_id: &str) -> Option<&EvolutionFormula> {
        self.by_base
            .get(&Identity::new(weapon_id))
            .map(|&slot| &self.formulas[slot])
    }

    /// The formula that produces `evolved_id`.
    ///
    /// If several formulas produce it, the first in source order.
    pub fn get_for_evolved_weapon(&self, evolved_id: &str) -> Option<&EvolutionFormula> {
        self.by_evolved
            .get(&Identity::new(evolved_id))
            .map(|&slot| &self.formulas[slot])
    }

    /// Number of formulas requiring `passive_id`, as a weapon or an item.
    pub fn count_passive_usages(&self, passive_id: &str) -> usize {
        self.by_passive
            .get(&Identity::new(passive_id))
            .map_or(0, Vec::len)
    }

    /// Every formula requiring `passive_id`, in source order.
    pub fn formulas_using_passive(&self, passive_id: &str) -> Vec<&EvolutionFormula> {
        self.by_passive
            .get(&Identity::new(passive_id))
            .map(|slots| slots.iter().map(|&slot| &self.formulas[slot]).collect())
            .unwrap_or_default()
    }

    /// Formulas requiring `weapon_id` as a weapon-typed passive.
    pub fn formulas_using_weapon_as_passive(&self, weapon_id: &str) -> Vec<&EvolutionFormula> {
        let id = Identity::new(weapon_id);
        self.formulas_using_passive(weapon_id)
            .into_iter()
            .filter(|formula| {
                formula
                    .required_passives
                    .iter()
                    .any(|req| req.source == PassiveSource::Weapon(id.clone()))
            })
            .collect()
    }

    /// Formulas requiring `item_id` as an item-typed passive.
    pub fn formulas_using_item_as_passive(&self, item_id: &str) -> Vec<&EvolutionFormula> {
        let id = Identity::new(item_id);
        self.formulas_using_passive(item_id)
            .into_iter()
            .filter(|formula| {
                formula
                    .required_passives
                    .iter()
                    .any(|req| req.source == PassiveSource::Item(id.clone()))
            })
            .collect()
    }

    /// Whether `weapon` works mainly as an ingredient for other evolutions.
    ///
    /// True when the weapon has no evolution of its own and is used as a
    /// passive at least once, or when it is used as a passive in two or more
    /// formulas. A weapon with its own evolution used in exactly one other
    /// formula stays an active weapon.
    pub fn is_primary_passive(&self, weapon: &WeaponInfo) -> bool {
        let usages = self.count_passive_usages(&weapon.id);
        if !weapon.has_evolution() && usages >= 1 {
            return true;
        }
        usages >= 2
    }

    /// The base weapon that evolves into `evolved`.
    pub fn find_base_weapon(&self, evolved: &WeaponInfo) -> Option<&WeaponInfo> {
        self.get_for_evolved_weapon(&evolved.id)
            .map(|formula| &formula.base_weapon)
    }

    /// Formulas in which `weapon_id` is the base or the result, base first.
    pub fn evolutions_for_weapon(&self, weapon_id: &str) -> Vec<&EvolutionFormula> {
        let mut found = Vec::with_capacity(2);
        if let Some(own) = self.get_for_weapon(weapon_id) {
            found.push(own);
        }
        if let Some(from) = self.get_for_evolved_weapon(weapon_id) {
            if !found.iter().any(|f| std::ptr::eq(*f, from)) {
                found.push(from);
            }
        }
        found
    }
}
