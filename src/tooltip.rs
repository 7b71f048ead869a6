//! Tooltip section planning.
//!
//! Decides which evolution sections a weapon or item tooltip shows and in
//! what order. Each section carries formulas already resolved against the
//! player's ownership context; turning them into widgets is the host's job.

use crate::context::OwnershipContext;
use crate::index::FormulaIndex;
use crate::model::{EvolutionFormula, PassiveRequirement};
use crate::resolver::FormulaResolver;
use serde::{Deserialize, Serialize};

/// Passive usages at which a weapon's tooltip leads with its ingredient role.
pub const PASSIVE_FOCUS_THRESHOLD: usize = 2;

/// One block of evolution information in a tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipSection {
    /// Formulas that use the hovered weapon or item as an ingredient.
    PassiveUsages(Vec<EvolutionFormula>),
    /// The formula that produced the hovered (evolved) weapon.
    EvolvedFrom(EvolutionFormula),
    /// The hovered weapon's own evolution.
    OwnEvolution(EvolutionFormula),
}

/// Ownership state of a single requirement, for icon badges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementStatus {
    pub requirement: PassiveRequirement,
    pub owned: bool,
    pub banned: bool,
}

/// Plans tooltip sections from a formula index.
///
/// # Examples
///
/// ```rust
/// use evoformula::*;
///
/// let whip = WeaponInfo::new("WHIP", "Whip")
///     .evolves_into("BLOODY_TEAR")
///     .requires(PassiveRequirement::item("HOLLOW_HEART"));
/// let index = FormulaIndex::build(vec![EvolutionFormula::new(whip)]);
///
/// let planner = TooltipPlanner::new(&index);
/// let sections = planner.weapon_sections("WHIP", &OwnershipContext::new());
/// assert!(matches!(sections[0], TooltipSection::OwnEvolution(_)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TooltipPlanner<'a> {
    index: &'a FormulaIndex,
    resolver: FormulaResolver,
}

impl<'a> TooltipPlanner<'a> {
    /// Create a planner over `index`.
    pub fn new(index: &'a FormulaIndex) -> Self {
        Self {
            index,
            resolver: FormulaResolver::new(),
        }
    }

    /// Sections for a weapon tooltip.
    ///
    /// A weapon used as a passive in two or more formulas shows those usages
    /// first, then where it came from. Otherwise it shows where it came from,
    /// then its own evolution.
    pub fn weapon_sections(&self, weapon_id: &str, ctx: &OwnershipContext) -> Vec<TooltipSection> {
        let mut sections = Vec::new();

        if self.index.count_passive_usages(weapon_id) >= PASSIVE_FOCUS_THRESHOLD {
            let usages = self.index.formulas_using_weapon_as_passive(weapon_id);
            if !usages.is_empty() {
                sections.push(TooltipSection::PassiveUsages(self.resolve_all(usages, ctx)));
            }
            if let Some(from) = self.index.get_for_evolved_weapon(weapon_id) {
                sections.push(TooltipSection::EvolvedFrom(self.resolver.resolve_existing(from, ctx)));
            }
            return sections;
        }

        if let Some(from) = self.index.get_for_evolved_weapon(weapon_id) {
            sections.push(TooltipSection::EvolvedFrom(self.resolver.resolve_existing(from, ctx)));
        }
        if let Some(own) = self.index.get_for_weapon(weapon_id) {
            sections.push(TooltipSection::OwnEvolution(self.resolver.resolve_existing(own, ctx)));
        }
        sections
    }

    /// Sections for an item tooltip: its passive usages, if any.
    pub fn item_sections(&self, item_id: &str, ctx: &OwnershipContext) -> Vec<TooltipSection> {
        let usages = self.index.formulas_using_item_as_passive(item_id);
        if usages.is_empty() {
            return Vec::new();
        }
        vec![TooltipSection::PassiveUsages(self.resolve_all(usages, ctx))]
    }

    fn resolve_all(&self, formulas: Vec<&EvolutionFormula>, ctx: &OwnershipContext) -> Vec<EvolutionFormula> {
        formulas
            .into_iter()
            .map(|formula| self.resolver.resolve_existing(formula, ctx))
            .collect()
    }
}

/// Owned and banned flags for each requirement of `formula`, in order.
pub fn requirement_statuses(
    formula: &EvolutionFormula,
    ctx: &OwnershipContext,
) -> Vec<RequirementStatus> {
    formula
        .required_passives
        .iter()
        .map(|req| RequirementStatus {
            requirement: req.clone(),
            owned: ctx.owned.contains_identity(req.identity()),
            banned: ctx.banned.contains_identity(req.identity()),
        })
        .collect()
}
