//! Tooltip example: from catalog data to a placed popup
//!
//! This example demonstrates:
//! - Loading a catalog from JSON and building the formula index
//! - Planning tooltip sections against the player's ownership
//! - Laying the requirement icons out in a grid
//! - Placing the popup on screen

use evoformula::*;

const CATALOG: &str = r#"{
    "weapons": [
        { "id": "WHIP", "name": "Whip", "evolves_into": "BLOODY_TEAR",
          "required_passives": [{ "source": { "item": "HOLLOW_HEART" }, "name": "Hollow Heart" }] },
        { "id": "BLOODY_TEAR", "name": "Bloody Tear" },
        { "id": "FIRE_WAND", "name": "Fire Wand", "evolves_into": "HELLFIRE",
          "required_passives": [{ "source": { "item": "SPINACH" }, "name": "Spinach" }] },
        { "id": "HELLFIRE", "name": "Hellfire" },
        { "id": "PEACHONE", "name": "Peachone", "evolves_into": "VANDALIER",
          "required_passives": [{ "source": { "weapon": "EBONY_WINGS" }, "name": "Ebony Wings" }] },
        { "id": "EBONY_WINGS", "name": "Ebony Wings", "evolves_into": "VANDALIER",
          "required_passives": [{ "source": { "weapon": "PEACHONE" }, "name": "Peachone" }] },
        { "id": "VANDALIER", "name": "Vandalier" }
    ],
    "items": [
        { "id": "HOLLOW_HEART", "name": "Hollow Heart" },
        { "id": "SPINACH", "name": "Spinach" }
    ]
}"#;

fn print_formula(formula: &EvolutionFormula, ctx: &OwnershipContext) {
    let evolved = formula
        .evolved_weapon
        .as_ref()
        .map(|w| w.name.as_str())
        .unwrap_or("?");
    let state = if formula.is_complete { "ready" } else { "incomplete" };
    println!("    {} -> {} ({})", formula.base_weapon.name, evolved, state);
    for status in requirement_statuses(formula, ctx) {
        let mark = match (status.owned, status.banned) {
            (_, true) => "banned",
            (true, false) => "owned",
            (false, false) => "missing",
        };
        println!("      - {} [{}]", status.requirement.label(), mark);
    }
}

fn main() -> Result<(), EvolutionError> {
    // Load data and build the shared index
    let catalog = Catalog::from_json(CATALOG)?;
    let index = catalog.build_index();
    EvolutionGraph::from_index(&index).detect_cycles()?;
    println!("Indexed {} formulas", index.len());

    // The player holds a Whip, Hollow Heart and Peachone; Spinach is banned
    let ctx = OwnershipContext::new()
        .with_owned(["WHIP", "HOLLOW_HEART", "PEACHONE"])
        .with_banned(["SPINACH"]);

    let planner = TooltipPlanner::new(&index);
    for hovered in ["WHIP", "VANDALIER"] {
        println!("\n=== Tooltip for {} ===", hovered);
        for section in planner.weapon_sections(hovered, &ctx) {
            match section {
                TooltipSection::OwnEvolution(formula) => {
                    println!("  Evolves into:");
                    print_formula(&formula, &ctx);
                }
                TooltipSection::EvolvedFrom(formula) => {
                    println!("  Evolved from:");
                    print_formula(&formula, &ctx);
                }
                TooltipSection::PassiveUsages(formulas) => {
                    println!("  Used in:");
                    for formula in &formulas {
                        print_formula(formula, &ctx);
                    }
                }
            }
        }
    }

    // Lay out the icons of an item tooltip
    let config = LayoutConfig::default();
    let grid = config.grid();
    let sections = planner.item_sections("SPINACH", &ctx);
    let icon_count = sections
        .iter()
        .map(|section| match section {
            TooltipSection::PassiveUsages(formulas) => formulas.len(),
            _ => 1,
        })
        .sum::<usize>();
    let (rows, cols) = grid.grid(icon_count, config.content_width());
    println!("\n=== Spinach tooltip layout ===");
    println!("  {} icon(s) in {} column(s) x {} row(s)", icon_count, cols, rows);
    for i in 0..icon_count {
        let (x, y) = grid.icon_position(i, cols);
        println!("  icon {} at ({:.1}, {:.1})", i, x, y);
    }
    let height = grid.total_height(icon_count, config.content_width()) + config.padding * 2.0;

    // Place the popup next to a mouse cursor and a controller selection
    let popup = config.popup();
    for (mode, anchor) in [
        (InputMode::Pointer, (900.0, 200.0)),
        (InputMode::Controller, (-950.0, -500.0)),
    ] {
        let (x, y) = popup.place(anchor.0, anchor.1, config.tooltip_width, height, mode);
        println!("  {:?} popup at ({:.1}, {:.1})", mode, x, y);
    }

    Ok(())
}
