//! # evoformula - Evolution Formula Engine for Game Tooltips
//!
//! A deterministic, host-independent engine behind weapon and item
//! tooltips in survivor-style games. It provides:
//! - **Formula resolution**: a weapon's evolution formula with missing and
//!   banned requirements worked out against the player's ownership
//! - **Reverse lookups**: O(1) queries by base weapon, evolved weapon and
//!   passive ingredient
//! - **Classification**: whether a weapon is mainly an ingredient
//!   ("primary passive") or an active weapon
//! - **Layout geometry**: icon grid packing and screen-clamped popup
//!   placement
//!
//! ## Pipeline
//!
//! ```text
//! [Catalog] → [FormulaIndex] → [FormulaResolver / TooltipPlanner] → host renderer
//!                                       ↑
//!                              [OwnershipContext]
//! ```
//!
//! Reading the live game, loading sprites, localization and building widgets
//! all stay in the host. The engine only sees plain data records.
//!
//! ## Example
//!
//! ```rust
//! use evoformula::*;
//!
//! let whip = WeaponInfo::new("WHIP", "Whip")
//!     .evolves_into("BLOODY_TEAR")
//!     .requires(PassiveRequirement::item("HOLLOW_HEART").named("Hollow Heart"));
//!
//! let resolver = FormulaResolver::new();
//! let ctx = OwnershipContext::new().with_owned(["hollow_heart"]);
//! let formula = resolver.resolve_formula(&whip, &ctx).unwrap().unwrap();
//! assert!(formula.is_complete);
//!
//! let index = FormulaIndex::build(vec![formula]);
//! assert_eq!(index.count_passive_usages("HOLLOW_HEART"), 1);
//!
//! let layout = IconGridLayout::new(38.0, 6.0);
//! assert_eq!(layout.grid(23, 440.0), (3, 10));
//! ```
//!
//! ## Modules
//!
//! - [`ident`] - Case-insensitive identifiers and sets
//! - [`model`] - Weapons, items, requirements, formulas
//! - [`validation`] - Ownership-only evolvability results
//! - [`context`] - Ownership context and player-state seam
//! - [`catalog`] - Game data provider and in-memory catalog
//! - [`resolver`] - Formula resolution
//! - [`index`] - Reverse-lookup formula index
//! - [`graph`] - Evolution chains and cycle detection
//! - [`tooltip`] - Tooltip section planning
//! - [`layout`] - Icon grid geometry
//! - [`popup`] - Popup placement
//! - [`config`] - Layout configuration
//! - [`error`] - Error types

pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod ident;
pub mod index;
pub mod layout;
pub mod model;
pub mod popup;
pub mod resolver;
pub mod tooltip;
pub mod validation;

// Re-export main types for convenience
pub use catalog::{Catalog, GameDataProvider};
pub use config::LayoutConfig;
pub use context::{OwnershipContext, PlayerStateProvider};
pub use error::EvolutionError;
pub use graph::EvolutionGraph;
pub use ident::{IdSet, Identity};
pub use index::FormulaIndex;
pub use layout::IconGridLayout;
pub use model::{EvolutionFormula, ItemInfo, PassiveRequirement, PassiveSource, WeaponInfo};
pub use popup::{InputMode, PopupPlacement};
pub use resolver::FormulaResolver;
pub use tooltip::{requirement_statuses, RequirementStatus, TooltipPlanner, TooltipSection};
pub use validation::EvolutionValidationResult;
