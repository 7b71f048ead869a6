//! Game data catalog.
//!
//! The engine reads weapon and item records through the `GameDataProvider`
//! trait. `Catalog` is the in-memory implementation: it can be filled by the
//! host's translation layer or loaded from JSON, and it performs the second
//! lookup that attaches evolved weapons to formulas.

use crate::context::{OwnershipContext, PlayerStateProvider};
use crate::error::EvolutionError;
use crate::ident::{IdSet, Identity};
use crate::index::FormulaIndex;
use crate::model::{EvolutionFormula, ItemInfo, WeaponInfo};
use crate::resolver::FormulaResolver;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read access to weapon and item definitions.
pub trait GameDataProvider {
    fn weapon(&self, id: &str) -> Option<&WeaponInfo>;

    fn item(&self, id: &str) -> Option<&ItemInfo>;

    fn weapons(&self) -> Vec<&WeaponInfo>;

    fn items(&self) -> Vec<&ItemInfo>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogData {
    #[serde(default)]
    weapons: Vec<WeaponInfo>,
    #[serde(default)]
    items: Vec<ItemInfo>,
}

/// Weapon and item definitions keyed by case-insensitive identity.
///
/// # Examples
///
/// ```rust
/// use evoformula::*;
///
/// let catalog = Catalog::from_json(r#"{
///     "weapons": [
///         { "id": "WHIP", "name": "Whip", "evolves_into": "BLOODY_TEAR",
///           "required_passives": [{ "source": { "item": "HOLLOW_HEART" } }] },
///         { "id": "BLOODY_TEAR", "name": "Bloody Tear" }
///     ],
///     "items": [{ "id": "HOLLOW_HEART", "name": "Hollow Heart" }]
/// }"#).unwrap();
///
/// assert!(catalog.weapon("bloody_tear").unwrap().is_evolved);
/// let formulas = catalog.build_formulas();
/// assert_eq!(formulas[0].evolved_weapon.as_ref().unwrap().name, "Bloody Tear");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    weapons: Vec<WeaponInfo>,
    items: Vec<ItemInfo>,
    weapon_slots: HashMap<Identity, usize>,
    item_slots: HashMap<Identity, usize>,
}

impl Catalog {
    /// Build a catalog from translated host records.
    ///
    /// Records with a blank identifier are dropped. A repeated identifier
    /// replaces the earlier record. Weapons named as some weapon's
    /// evolution target are marked `is_evolved`.
    pub fn new(
        weapons: impl IntoIterator<Item = WeaponInfo>,
        items: impl IntoIterator<Item = ItemInfo>,
    ) -> Self {
        let mut catalog = Self::default();

        for weapon in weapons {
            let id = weapon.identity();
            if id.is_blank() {
                tracing::warn!(name = %weapon.name, "dropping weapon with a blank id");
                continue;
            }
            insert_keyed(&mut catalog.weapons, &mut catalog.weapon_slots, id, weapon);
        }
        for item in items {
            let id = item.identity();
            if id.is_blank() {
                tracing::warn!(name = %item.name, "dropping item with a blank id");
                continue;
            }
            insert_keyed(&mut catalog.items, &mut catalog.item_slots, id, item);
        }

        let targets: IdSet = catalog
            .weapons
            .iter()
            .filter_map(|w| w.evolution_target())
            .collect();
        for weapon in &mut catalog.weapons {
            if targets.contains_identity(&weapon.identity()) {
                weapon.is_evolved = true;
            }
        }

        tracing::debug!(
            weapons = catalog.weapons.len(),
            items = catalog.items.len(),
            "loaded catalog"
        );
        catalog
    }

    /// Load a catalog from a JSON document with `weapons` and `items` arrays.
    pub fn from_json(json: &str) -> Result<Self, EvolutionError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Ok(Self::new(data.weapons, data.items))
    }

    /// Serialize the catalog back to JSON.
    pub fn to_json(&self) -> Result<String, EvolutionError> {
        let data = CatalogData {
            weapons: self.weapons.clone(),
            items: self.items.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// One formula per evolving weapon, with the evolved weapon attached.
    ///
    /// The evolved weapon stays `None` when the target is not in the
    /// catalog.
    pub fn build_formulas(&self) -> Vec<EvolutionFormula> {
        self.weapons
            .iter()
            .filter_map(|weapon| {
                let target = weapon.evolution_target()?;
                let formula = EvolutionFormula::new(weapon.clone());
                Some(match self.weapon(target) {
                    Some(evolved) => formula.with_evolved_weapon(evolved.clone()),
                    None => {
                        tracing::debug!(
                            base = %weapon.id,
                            evolves_into = target,
                            "evolution target not in catalog"
                        );
                        formula
                    }
                })
            })
            .collect()
    }

    /// Build a fresh index over [`build_formulas`](Self::build_formulas).
    pub fn build_index(&self) -> FormulaIndex {
        FormulaIndex::build(self.build_formulas())
    }

    /// Items with `used_in_evolutions` filled in from `index`.
    pub fn items_with_usages(&self, index: &FormulaIndex) -> Vec<ItemInfo> {
        self.items
            .iter()
            .map(|item| {
                let mut item = item.clone();
                item.used_in_evolutions = index
                    .formulas_using_item_as_passive(&item.id)
                    .into_iter()
                    .map(|formula| formula.base_weapon.id.clone())
                    .collect();
                item
            })
            .collect()
    }

    /// Capture the player's current ownership of every catalog entry.
    pub fn snapshot<P>(&self, provider: &P) -> OwnershipContext
    where
        P: PlayerStateProvider + ?Sized,
    {
        OwnershipContext::snapshot(provider, &self.weapons, &self.items)
    }

    /// Resolve `weapon_id`'s formula and attach its evolved weapon.
    ///
    /// Unknown weapons and weapons without an evolution give `Ok(None)`.
    pub fn resolve_formula(
        &self,
        resolver: &FormulaResolver,
        weapon_id: &str,
        ctx: &OwnershipContext,
    ) -> Result<Option<EvolutionFormula>, EvolutionError> {
        let Some(weapon) = self.weapon(weapon_id) else {
            return Ok(None);
        };
        let resolved = resolver.resolve_formula(weapon, ctx)?;
        Ok(resolved.map(|formula| {
            match weapon.evolution_target().and_then(|target| self.weapon(target)) {
                Some(evolved) => formula.with_evolved_weapon(evolved.clone()),
                None => formula,
            }
        }))
    }
}

fn insert_keyed<T>(records: &mut Vec<T>, slots: &mut HashMap<Identity, usize>, id: Identity, record: T) {
    match slots.get(&id) {
        Some(&slot) => records[slot] = record,
        None => {
            slots.insert(id, records.len());
            records.push(record);
        }
    }
}

impl GameDataProvider for Catalog {
    fn weapon(&self, id: &str) -> Option<&WeaponInfo> {
        self.weapon_slots
            .get(&Identity::new(id))
            .map(|&slot| &self.weapons[slot])
    }

    fn item(&self, id: &str) -> Option<&ItemInfo> {
        self.item_slots
            .get(&Identity::new(id))
            .map(|&slot| &self.items[slot])
    }

    fn weapons(&self) -> Vec<&WeaponInfo> {
        self.weapons.iter().collect()
    }

    fn items(&self) -> Vec<&ItemInfo> {
        self.items.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PassiveRequirement;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                WeaponInfo::new("WHIP", "Whip")
                    .evolves_into("BLOODY_TEAR")
                    .requires(PassiveRequirement::item("HOLLOW_HEART")),
                WeaponInfo::new("BLOODY_TEAR", "Bloody Tear"),
                WeaponInfo::new("WAND", "Magic Wand")
                    .evolves_into("HOLY_WAND")
                    .requires(PassiveRequirement::item("EMPTY_TOME")),
                WeaponInfo::new("", "Broken"),
            ],
            vec![
                ItemInfo::new("HOLLOW_HEART", "Hollow Heart"),
                ItemInfo::new("EMPTY_TOME", "Empty Tome"),
                ItemInfo::new("SPINACH", "Spinach"),
            ],
        )
    }

    #[test]
    fn test_blank_records_are_dropped() {
        assert_eq!(catalog().weapons().len(), 3);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(catalog.weapon("whip").unwrap().name, "Whip");
        assert_eq!(catalog.item("Empty_Tome").unwrap().name, "Empty Tome");
        assert!(catalog.weapon("GARLIC").is_none());
    }

    #[test]
    fn test_evolved_weapons_are_marked() {
        let catalog = catalog();
        assert!(catalog.weapon("BLOODY_TEAR").unwrap().is_evolved);
        assert!(!catalog.weapon("WHIP").unwrap().is_evolved);
    }

    #[test]
    fn test_build_formulas_attaches_known_targets() {
        let formulas = catalog().build_formulas();
        assert_eq!(formulas.len(), 2);
        assert_eq!(formulas[0].evolved_weapon.as_ref().unwrap().id, "BLOODY_TEAR");
        assert!(formulas[1].evolved_weapon.is_none());
    }

    #[test]
    fn test_items_with_usages() {
        let catalog = catalog();
        let index = catalog.build_index();
        let items = catalog.items_with_usages(&index);

        assert_eq!(items[0].used_in_evolutions, vec!["WHIP"]);
        assert_eq!(items[1].used_in_evolutions, vec!["WAND"]);
        assert!(items[2].used_in_evolutions.is_empty());
    }

    #[test]
    fn test_resolve_formula_attaches_evolved_weapon() {
        let catalog = catalog();
        let ctx = OwnershipContext::new().with_owned(["HOLLOW_HEART"]);
        let formula = catalog
            .resolve_formula(&FormulaResolver::new(), "whip", &ctx)
            .unwrap()
            .unwrap();

        assert!(formula.is_complete);
        assert_eq!(formula.evolved_weapon.unwrap().name, "Bloody Tear");
        assert!(catalog
            .resolve_formula(&FormulaResolver::new(), "GARLIC", &ctx)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_json_round_trip_keeps_records() {
        let catalog = catalog();
        let reloaded = Catalog::from_json(&catalog.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.weapons().len(), 3);
        assert_eq!(reloaded.items().len(), 3);
    }
}
