//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used for every node id, edge endpoint
//! and visibility key in an Assay diagram.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Efficient identifier type using string interning
///
/// Node ids in a diagram are compared and hashed constantly (adjacency
/// lookups, visibility lookups), so they are interned once and passed around
/// as a `Copy` symbol.
///
/// # Examples
///
/// ```
/// use assay_core::identifier::Id;
///
/// let goal = Id::new("goal-1");
/// let generated = Id::new("evidence").create_suffixed(3);
///
/// assert_eq!(goal, "goal-1");
/// assert_eq!(generated, "evidence-3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates a new `Id` by appending `-<suffix>` to this identifier.
    ///
    /// Used to derive ids for nodes created interactively, where the base is
    /// the node type and the suffix a counter.
    pub fn create_suffixed(&self, suffix: usize) -> Self {
        let mut interner = interner();
        let base = interner.resolve(self.0).unwrap_or_default().to_string();
        let symbol = interner.get_or_intern(format!("{base}-{suffix}"));
        Self(symbol)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner.resolve(self.0).unwrap_or_default();
        write!(f, "{str_value}")
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("goal-1");
        let id2 = Id::new("goal-1");
        let id3 = Id::new("strategy-1");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "goal-1");
    }

    #[test]
    fn test_create_suffixed() {
        let base = Id::new("propertyClaim");

        let first = base.create_suffixed(1);
        let second = base.create_suffixed(2);

        assert_ne!(first, second);
        assert_eq!(first, "propertyClaim-1");
        assert_eq!(second, "propertyClaim-2");
        assert_eq!(base.create_suffixed(1), first);
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_from_trait() {
        let id1: Id = "test_string".into();
        let id2 = Id::new("test_string");

        assert_eq!(id1, id2);
        assert_eq!(id1, "test_string");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let id1 = Id::new("key1");
        let id2 = Id::new("key1");
        let id3 = Id::new("key2");

        let mut map = HashMap::new();
        map.insert(id1, "value1");
        map.insert(id3, "value2");

        assert_eq!(map.get(&id2), Some(&"value1"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("evidence-7");

        assert!(id == "evidence-7");
        assert!(id != "evidence");

        let empty = Id::new("");
        assert!(empty == "");
        assert!(empty != "non-empty");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = Id::new("context-2");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"context-2\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_serde_as_map_key() {
        use std::collections::HashMap;

        let map = HashMap::from([(Id::new("goal-1"), true)]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"goal-1":true}"#);

        let back: HashMap<Id, bool> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }
}
