//! Ownership context for formula resolution.
//!
//! The `OwnershipContext` carries what the player owns and what they have
//! banned. It is built by the host (directly, or by snapshotting a
//! `PlayerStateProvider`) and passed to every resolver query.

use crate::ident::IdSet;
use crate::model::{ItemInfo, WeaponInfo};
use serde::{Deserialize, Serialize};

/// Live player state as exposed by the host game.
///
/// Implemented by the integration layer; the engine only ever reads it
/// through [`OwnershipContext::snapshot`].
pub trait PlayerStateProvider {
    fn owns_weapon(&self, weapon_id: &str) -> bool;

    fn owns_item(&self, item_id: &str) -> bool;

    /// Accessory slots hold weapon-typed passives in some games.
    fn owns_accessory(&self, _weapon_id: &str) -> bool {
        false
    }

    fn is_weapon_banned(&self, weapon_id: &str) -> bool;

    fn is_item_banned(&self, item_id: &str) -> bool;
}

/// Owned and banned identifiers for a single query.
///
/// # Examples
///
/// ```rust
/// use evoformula::OwnershipContext;
///
/// let ctx = OwnershipContext::new()
///     .with_owned(["WHIP", "hollow_heart"])
///     .with_banned(["SPINACH"]);
///
/// assert!(ctx.owns("HOLLOW_HEART"));
/// assert!(ctx.is_banned("spinach"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipContext {
    pub owned: IdSet,
    pub banned: IdSet,
}

impl OwnershipContext {
    /// Create an empty context: nothing owned, nothing banned.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_owned<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<crate::ident::Identity>,
    {
        self.owned.extend(ids);
        self
    }

    pub fn with_banned<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<crate::ident::Identity>,
    {
        self.banned.extend(ids);
        self
    }

    pub fn owns(&self, id: &str) -> bool {
        self.owned.contains(id)
    }

    pub fn is_banned(&self, id: &str) -> bool {
        self.banned.contains(id)
    }

    /// Capture the provider's current state for every known weapon and item.
    ///
    /// A weapon counts as owned when held either as a weapon or as an
    /// accessory.
    pub fn snapshot<'a, P>(
        provider: &P,
        weapons: impl IntoIterator<Item = &'a WeaponInfo>,
        items: impl IntoIterator<Item = &'a ItemInfo>,
    ) -> Self
    where
        P: PlayerStateProvider + ?Sized,
    {
        let mut ctx = Self::new();
        for weapon in weapons {
            if provider.owns_weapon(&weapon.id) || provider.owns_accessory(&weapon.id) {
                ctx.owned.insert(weapon.id.as_str());
            }
            if provider.is_weapon_banned(&weapon.id) {
                ctx.banned.insert(weapon.id.as_str());
            }
        }
        for item in items {
            if provider.owns_item(&item.id) {
                ctx.owned.insert(item.id.as_str());
            }
            if provider.is_item_banned(&item.id) {
                ctx.banned.insert(item.id.as_str());
            }
        }
        tracing::debug!(
            owned = ctx.owned.len(),
            banned = ctx.banned.len(),
            "captured ownership snapshot"
        );
        ctx
    }
}
