//! Identifier module.
//!
//! Provides `Identity`, the normalized key every index and ownership set is
//! keyed by, and `IdSet`, a case-insensitive set of identities.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;

/// Case-insensitive identifier for weapons and items.
///
/// The string is stored with ASCII letters upper-cased, so equality, hashing
/// and ordering ignore ASCII case. Whitespace and non-ASCII characters are
/// kept as written. Uses `Arc<str>` so clones held by several indices share one
/// allocation.
///
/// # Examples
///
/// ```rust
/// use evoformula::Identity;
///
/// let a = Identity::new("hollow_heart");
/// let b: Identity = "HOLLOW_HEART".into();
///
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "HOLLOW_HEART");
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Identity(Arc<str>);

impl Identity {
    /// Create a new `Identity`, folding ASCII case.
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s.to_ascii_uppercase()))
    }

    /// Get the normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty or only whitespace.
    ///
    /// A blank identity never names a real weapon or item.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl Serialize for Identity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Identity::new(&s))
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<&String> for Identity {
    fn from(s: &String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A logical set of identifiers with case-insensitive membership.
///
/// Used for the owned and banned sets handed to the resolver.
///
/// # Examples
///
/// ```rust
/// use evoformula::IdSet;
///
/// let owned: IdSet = ["Whip", "hollow_heart"].into_iter().collect();
/// assert!(owned.contains("WHIP"));
/// assert!(owned.contains("Hollow_Heart"));
/// assert!(!owned.contains("SPINACH"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSet(HashSet<Identity>);

impl IdSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier. Blank identifiers are ignored.
    pub fn insert(&mut self, id: impl Into<Identity>) -> bool {
        let id = id.into();
        if id.is_blank() {
            return false;
        }
        self.0.insert(id)
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(&Identity::new(id))
    }

    /// Membership test for an already-normalized identity.
    pub fn contains_identity(&self, id: &Identity) -> bool {
        self.0.contains(id)
    }

    /// Number of identifiers in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the normalized identifiers, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.0.iter()
    }
}

impl<T: Into<Identity>> FromIterator<T> for IdSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = IdSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl<T: Into<Identity>> Extend<T> for IdSet {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for id in iter {
            self.insert(id);
        }
    }
}
