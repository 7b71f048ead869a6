//! Domain model module.
//!
//! Weapons, items, passive requirements and evolution formulas as plain
//! data. Nothing in here consults ownership or bans; the resolver produces
//! new records with those derived fields filled in.

use crate::ident::Identity;
use serde::{Deserialize, Serialize};

/// A weapon as seen by the evolution engine.
///
/// # Examples
///
/// ```rust
/// use evoformula::{PassiveRequirement, WeaponInfo};
///
/// let whip = WeaponInfo::new("WHIP", "Whip")
///     .evolves_into("BLOODY_TEAR")
///     .requires(PassiveRequirement::item("HOLLOW_HEART").named("Hollow Heart"));
///
/// assert_eq!(whip.evolution_target(), Some("BLOODY_TEAR"));
/// assert_eq!(whip.required_passives.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Identifier of the weapon this one evolves into, if any.
    #[serde(default)]
    pub evolves_into: Option<String>,
    #[serde(default)]
    pub required_passives: Vec<PassiveRequirement>,
    /// Set for weapons that are the result of some formula.
    #[serde(default)]
    pub is_evolved: bool,
}

impl WeaponInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            evolves_into: None,
            required_passives: Vec::new(),
            is_evolved: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn evolves_into(mut self, target: impl Into<String>) -> Self {
        self.evolves_into = Some(target.into());
        self
    }

    /// Append a passive requirement, keeping declaration order.
    pub fn requires(mut self, requirement: PassiveRequirement) -> Self {
        self.required_passives.push(requirement);
        self
    }

    pub fn identity(&self) -> Identity {
        Identity::new(&self.id)
    }

    /// The evolution target, treating a blank string as no evolution.
    pub fn evolution_target(&self) -> Option<&str> {
        self.evolves_into
            .as_deref()
            .filter(|target| !target.trim().is_empty())
    }

    pub fn has_evolution(&self) -> bool {
        self.evolution_target().is_some()
    }
}

/// An item (power-up) as seen by the evolution engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base weapons whose formulas use this item.
    ///
    /// A convenience view derived from the formula index, never
    /// authoritative.
    #[serde(default)]
    pub used_in_evolutions: Vec<String>,
}

impl ItemInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            used_in_evolutions: Vec::new(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::new(&self.id)
    }
}

/// What a passive requirement points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassiveSource {
    Weapon(Identity),
    Item(Identity),
}

impl PassiveSource {
    pub fn identity(&self) -> &Identity {
        match self {
            PassiveSource::Weapon(id) | PassiveSource::Item(id) => id,
        }
    }
}

/// A weapon or item that must be owned for an evolution to trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveRequirement {
    pub source: PassiveSource,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub requires_max_level: bool,
}

impl PassiveRequirement {
    pub fn new(source: PassiveSource) -> Self {
        Self {
            source,
            name: None,
            requires_max_level: false,
        }
    }

    /// A requirement satisfied by owning a weapon (or accessory).
    pub fn weapon(id: &str) -> Self {
        Self::new(PassiveSource::Weapon(Identity::new(id)))
    }

    /// A requirement satisfied by owning an item.
    pub fn item(id: &str) -> Self {
        Self::new(PassiveSource::Item(Identity::new(id)))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn max_level(mut self) -> Self {
        self.requires_max_level = true;
        self
    }

    pub fn identity(&self) -> &Identity {
        self.source.identity()
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.source, PassiveSource::Weapon(_))
    }

    pub fn is_item(&self) -> bool {
        matches!(self.source, PassiveSource::Item(_))
    }

    /// Display name, falling back to the identity.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => self.identity().to_string(),
        }
    }
}

/// The rule by which a base weapon plus passives becomes an evolved weapon.
///
/// `is_complete`, `missing_requirements` and `has_banned_requirements` are
/// not intrinsic: they are only meaningful on a formula returned by
/// [`FormulaResolver::resolve_formula`](crate::FormulaResolver::resolve_formula),
/// computed against that call's ownership context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionFormula {
    pub base_weapon: WeaponInfo,
    /// Filled in by the caller through a second lookup by `evolves_into`.
    #[serde(default)]
    pub evolved_weapon: Option<WeaponInfo>,
    pub required_passives: Vec<PassiveRequirement>,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub missing_requirements: Vec<PassiveRequirement>,
    #[serde(default)]
    pub has_banned_requirements: bool,
}

impl EvolutionFormula {
    /// Create an unresolved formula for `base_weapon`.
    pub fn new(base_weapon: WeaponInfo) -> Self {
        let required_passives = base_weapon.required_passives.clone();
        Self {
            base_weapon,
            evolved_weapon: None,
            required_passives,
            is_complete: false,
            missing_requirements: Vec::new(),
            has_banned_requirements: false,
        }
    }

    /// Attach the evolved weapon found by the second lookup.
    pub fn with_evolved_weapon(mut self, evolved: WeaponInfo) -> Self {
        self.evolved_weapon = Some(evolved);
        self
    }

    pub fn base_identity(&self) -> Identity {
        self.base_weapon.identity()
    }

    /// Identity of the result weapon.
    ///
    /// Uses the populated evolved weapon when present, otherwise the base
    /// weapon's declared target.
    pub fn evolved_identity(&self) -> Option<Identity> {
        match &self.evolved_weapon {
            Some(evolved) => Some(evolved.identity()),
            None => self.base_weapon.evolution_target().map(Identity::new),
        }
    }

    /// Whether any requirement names `id`, regardless of kind.
    pub fn uses_passive(&self, id: &Identity) -> bool {
        self.required_passives.iter().any(|req| req.identity() == id)
    }
}
