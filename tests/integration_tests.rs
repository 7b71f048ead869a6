//! End-to-end tests: catalog → index → resolver → tooltip/layout.

use evoformula::*;

fn sample_catalog() -> Catalog {
    Catalog::from_json(
        r#"{
        "weapons": [
            { "id": "WHIP", "name": "Whip", "evolves_into": "BLOODY_TEAR",
              "required_passives": [{ "source": { "item": "HOLLOW_HEART" }, "name": "Hollow Heart" }] },
            { "id": "BLOODY_TEAR", "name": "Bloody Tear" },
            { "id": "MAGIC_WAND", "name": "Magic Wand", "evolves_into": "HOLY_WAND",
              "required_passives": [{ "source": { "item": "EMPTY_TOME" }, "name": "Empty Tome" }] },
            { "id": "HOLY_WAND", "name": "Holy Wand" },
            { "id": "KNIFE", "name": "Knife", "evolves_into": "THOUSAND_EDGE",
              "required_passives": [{ "source": { "item": "BRACER" }, "name": "Bracer" }] },
            { "id": "THOUSAND_EDGE", "name": "Thousand Edge" },
            { "id": "PEACHONE", "name": "Peachone", "evolves_into": "VANDALIER",
              "required_passives": [
                  { "source": { "weapon": "EBONY_WINGS" }, "name": "Ebony Wings", "requires_max_level": true }
              ] },
            { "id": "EBONY_WINGS", "name": "Ebony Wings", "evolves_into": "VANDALIER",
              "required_passives": [{ "source": { "weapon": "PEACHONE" }, "name": "Peachone" }] },
            { "id": "VANDALIER", "name": "Vandalier" },
            { "id": "KING_BIBLE", "name": "King Bible", "evolves_into": "UNHOLY_VESPERS",
              "required_passives": [{ "source": { "item": "SPELLBINDER" } }] },
            { "id": "UNHOLY_VESPERS", "name": "Unholy Vespers" }
        ],
        "items": [
            { "id": "HOLLOW_HEART", "name": "Hollow Heart" },
            { "id": "EMPTY_TOME", "name": "Empty Tome" },
            { "id": "BRACER", "name": "Bracer" },
            { "id": "SPELLBINDER", "name": "Spellbinder" },
            { "id": "SPINACH", "name": "Spinach" }
        ]
    }"#,
    )
    .unwrap()
}

// ============================================================================
// Resolver scenarios
// ============================================================================

#[test]
fn test_whip_with_hollow_heart_is_complete() {
    let whip = WeaponInfo::new("WHIP", "Whip")
        .evolves_into("BLOODY_TEAR")
        .requires(PassiveRequirement::item("HOLLOW_HEART"));
    let resolver = FormulaResolver::new();

    let owned = OwnershipContext::new().with_owned(["HOLLOW_HEART"]);
    let formula = resolver.resolve_formula(&whip, &owned).unwrap().unwrap();
    assert!(formula.is_complete);

    let nothing = OwnershipContext::new();
    let formula = resolver.resolve_formula(&whip, &nothing).unwrap().unwrap();
    assert_eq!(formula.missing_requirements.len(), 1);
}

#[test]
fn test_lowercase_ownership_satisfies_uppercase_requirement() {
    let catalog = sample_catalog();
    let ctx = OwnershipContext::new().with_owned(["hollow_heart"]);
    let formula = catalog
        .resolve_formula(&FormulaResolver::new(), "WHIP", &ctx)
        .unwrap()
        .unwrap();
    assert!(formula.is_complete);
    assert_eq!(formula.evolved_weapon.unwrap().id, "BLOODY_TEAR");
}

#[test]
fn test_ban_asymmetry_between_resolve_and_validate() {
    let catalog = sample_catalog();
    let whip = catalog.weapon("WHIP").unwrap();
    let resolver = FormulaResolver::new();
    let ctx = OwnershipContext::new()
        .with_owned(["HOLLOW_HEART"])
        .with_banned(["HOLLOW_HEART"]);

    let formula = resolver.resolve_formula(whip, &ctx).unwrap().unwrap();
    assert!(!formula.is_complete);
    assert!(formula.has_banned_requirements);

    let validation = resolver.validate_evolution(whip, &ctx.owned).unwrap();
    assert!(validation.can_evolve);
}

#[test]
fn test_non_evolving_weapon_everywhere() {
    let catalog = sample_catalog();
    let resolver = FormulaResolver::new();
    let vandalier = catalog.weapon("VANDALIER").unwrap();

    assert!(resolver
        .resolve_formula(vandalier, &OwnershipContext::new())
        .unwrap()
        .is_none());
    let validation = resolver
        .validate_evolution(vandalier, &IdSet::new())
        .unwrap();
    assert!(!validation.can_evolve);
    assert_eq!(validation.block_reason.as_deref(), Some("Weapon does not evolve"));
    assert!(validation.missing_passives.is_empty());
}

#[test]
fn test_unnamed_requirement_uses_identity_in_validation() {
    let catalog = sample_catalog();
    let bible = catalog.weapon("KING_BIBLE").unwrap();
    let validation = FormulaResolver::new()
        .validate_evolution(bible, &IdSet::new())
        .unwrap();
    assert_eq!(validation.missing_passives, vec!["SPELLBINDER"]);
}

#[test]
fn test_max_level_requirement_reported() {
    let catalog = sample_catalog();
    let peachone = catalog.weapon("PEACHONE").unwrap();
    let validation = FormulaResolver::new()
        .validate_evolution(peachone, &IdSet::new())
        .unwrap();
    assert_eq!(validation.requires_max_level, vec!["Ebony Wings"]);
}

// ============================================================================
// Index scenarios
// ============================================================================

#[test]
fn test_spinach_used_twice() {
    let a = EvolutionFormula::new(
        WeaponInfo::new("FIRE_WAND", "Fire Wand")
            .evolves_into("HELLFIRE")
            .requires(PassiveRequirement::item("SPINACH")),
    );
    let b = EvolutionFormula::new(
        WeaponInfo::new("OTHER", "Other")
            .evolves_into("OTHER_EVO")
            .requires(PassiveRequirement::item("spinach")),
    );
    let index = FormulaIndex::build(vec![a, b]);

    assert_eq!(index.count_passive_usages("SPINACH"), 2);
    assert_eq!(index.formulas_using_passive("Spinach").len(), 2);
}

#[test]
fn test_primary_passive_classification() {
    let uses_spinach = EvolutionFormula::new(
        WeaponInfo::new("FIRE_WAND", "Fire Wand")
            .evolves_into("HELLFIRE")
            .requires(PassiveRequirement::weapon("SPINACH")),
    );
    let index = FormulaIndex::build(vec![uses_spinach]);

    // No evolution of its own, used once.
    let spinach = WeaponInfo::new("SPINACH", "Spinach");
    assert!(index.is_primary_passive(&spinach));

    // Has its own evolution, used once.
    let evolving = WeaponInfo::new("SPINACH", "Spinach").evolves_into("SUPER_SPINACH");
    assert!(!index.is_primary_passive(&evolving));

    // Not used at all.
    assert!(!index.is_primary_passive(&WeaponInfo::new("GARLIC", "Garlic")));
}

#[test]
fn test_primary_passive_with_two_usages_despite_own_evolution() {
    let catalog = sample_catalog();
    let extra = EvolutionFormula::new(
        WeaponInfo::new("GUN", "Gun")
            .evolves_into("BIG_GUN")
            .requires(PassiveRequirement::weapon("PEACHONE")),
    );
    let mut formulas = catalog.build_formulas();
    formulas.push(extra);
    let index = FormulaIndex::build(formulas);

    let peachone = catalog.weapon("PEACHONE").unwrap();
    assert!(peachone.has_evolution());
    assert_eq!(index.count_passive_usages("PEACHONE"), 2);
    assert!(index.is_primary_passive(peachone));
}

#[test]
fn test_find_base_weapon() {
    let catalog = sample_catalog();
    let index = catalog.build_index();

    let tear = catalog.weapon("BLOODY_TEAR").unwrap();
    assert_eq!(index.find_base_weapon(tear).unwrap().id, "WHIP");
    let whip = catalog.weapon("WHIP").unwrap();
    assert!(index.find_base_weapon(whip).is_none());
}

#[test]
fn test_shared_evolution_resolves_to_first_producer() {
    let catalog = sample_catalog();
    let index = catalog.build_index();

    let vandalier = catalog.weapon("VANDALIER").unwrap();
    assert_eq!(index.find_base_weapon(vandalier).unwrap().id, "PEACHONE");
    let from = index.get_for_evolved_weapon("vandalier").unwrap();
    assert_eq!(from.base_weapon.id, "PEACHONE");

    // Both producers are still reachable by base weapon.
    let wings = index.get_for_weapon("EBONY_WINGS").unwrap();
    assert_eq!(wings.evolved_weapon.as_ref().unwrap().id, "VANDALIER");
    let found: Vec<_> = index
        .evolutions_for_weapon("VANDALIER")
        .iter()
        .map(|f| f.base_weapon.id.as_str())
        .collect();
    assert_eq!(found, vec!["PEACHONE"]);
}

#[test]
fn test_duplicate_base_keeps_source_order() {
    let mut formulas = sample_catalog().build_formulas();
    formulas.push(EvolutionFormula::new(
        WeaponInfo::new("whip", "Whip")
            .evolves_into("VAMPIRE_KILLER")
            .requires(PassiveRequirement::item("SPINACH")),
    ));
    let index = FormulaIndex::build(formulas);

    let order: Vec<_> = index
        .formulas()
        .map(|f| f.base_identity().as_str().to_string())
        .collect();
    assert_eq!(
        order,
        vec![
            "MAGIC_WAND",
            "KNIFE",
            "PEACHONE",
            "EBONY_WINGS",
            "KING_BIBLE",
            "WHIP"
        ]
    );
    assert_eq!(index.count_passive_usages("HOLLOW_HEART"), 0);
    assert!(index.get_for_evolved_weapon("BLOODY_TEAR").is_none());
    assert_eq!(
        index.get_for_evolved_weapon("VAMPIRE_KILLER").unwrap().base_weapon.id,
        "whip"
    );
}

#[test]
fn test_padded_ownership_does_not_match() {
    let catalog = sample_catalog();
    let ctx = OwnershipContext::new().with_owned([" hollow_heart "]);
    let formula = catalog
        .resolve_formula(&FormulaResolver::new(), "WHIP", &ctx)
        .unwrap()
        .unwrap();
    assert!(!formula.is_complete);
}

#[test]
fn test_item_usage_view() {
    let catalog = sample_catalog();
    let index = catalog.build_index();
    let items = catalog.items_with_usages(&index);

    let tome = items.iter().find(|i| i.id == "EMPTY_TOME").unwrap();
    assert_eq!(tome.used_in_evolutions, vec!["MAGIC_WAND"]);
    let spinach = items.iter().find(|i| i.id == "SPINACH").unwrap();
    assert!(spinach.used_in_evolutions.is_empty());
}

#[test]
fn test_shared_index_across_threads() {
    let index = std::sync::Arc::new(sample_catalog().build_index());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = std::sync::Arc::clone(&index);
            std::thread::spawn(move || index.count_passive_usages("HOLLOW_HEART"))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}

// ============================================================================
// Graph
// ============================================================================

#[test]
fn test_catalog_graph_is_acyclic() {
    let index = sample_catalog().build_index();
    let graph = EvolutionGraph::from_index(&index);
    assert!(graph.detect_cycles().is_ok());
    assert_eq!(
        graph.lineage("HOLY_WAND"),
        vec![Identity::new("MAGIC_WAND"), Identity::new("HOLY_WAND")]
    );
}

#[test]
fn test_cyclic_data_is_reported() {
    let a = EvolutionFormula::new(WeaponInfo::new("A", "A").evolves_into("B"));
    let b = EvolutionFormula::new(WeaponInfo::new("B", "B").evolves_into("A"));
    let graph = EvolutionGraph::from_index(&FormulaIndex::build(vec![a, b]));
    assert!(matches!(
        graph.detect_cycles(),
        Err(EvolutionError::Cycle { .. })
    ));
}

// ============================================================================
// Tooltip + layout
// ============================================================================

#[test]
fn test_tooltip_item_sections_lay_out_in_grid() {
    let catalog = sample_catalog();
    let index = catalog.build_index();
    let config = LayoutConfig::default();
    let planner = TooltipPlanner::new(&index);

    let sections = planner.item_sections("HOLLOW_HEART", &OwnershipContext::new());
    let TooltipSection::PassiveUsages(formulas) = &sections[0] else {
        panic!("Expected PassiveUsages");
    };

    // base + passives + result icons
    let icons = formulas[0].required_passives.len() + 2;
    let grid = config.grid();
    let (rows, cols) = grid.grid(icons, config.content_width());
    assert_eq!((rows, cols), (1, 8));
    assert_eq!(grid.total_height(icons, config.content_width()), 38.0);
}

#[test]
fn test_layout_scenarios() {
    let layout = IconGridLayout::new(38.0, 6.0);
    assert_eq!(layout.icons_per_row(440.0), 10);
    assert_eq!(layout.grid(23, 440.0), (3, 10));

    let popup = PopupPlacement::new(1920.0, 1080.0);
    assert_eq!(
        popup.place(900.0, 200.0, 420.0, 300.0, InputMode::from(false)),
        (540.0, 240.0)
    );
}

#[test]
fn test_snapshot_from_player_state() {
    struct Run;

    impl PlayerStateProvider for Run {
        fn owns_weapon(&self, weapon_id: &str) -> bool {
            weapon_id == "MAGIC_WAND"
        }

        fn owns_item(&self, item_id: &str) -> bool {
            item_id == "EMPTY_TOME"
        }

        fn is_weapon_banned(&self, _weapon_id: &str) -> bool {
            false
        }

        fn is_item_banned(&self, _item_id: &str) -> bool {
            false
        }
    }

    let catalog = sample_catalog();
    let ctx = catalog.snapshot(&Run);
    let formula = catalog
        .resolve_formula(&FormulaResolver::new(), "MAGIC_WAND", &ctx)
        .unwrap()
        .unwrap();
    assert!(formula.is_complete);
}
