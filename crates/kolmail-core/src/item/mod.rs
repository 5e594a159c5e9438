//! Items and the catalog they are looked up in.
//!
//! Items are owned by the game's static catalog; this crate only refers to
//! them. Equality and hashing go through the item id so that two copies of
//! the same catalog entry compare equal.

mod attachments;

use std::collections::HashMap;

use kolmail_protocol::ItemId;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use attachments::{AttachmentSet, Attachments};

/// A catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Stable numeric code.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Plural display name, when it is not simply `name` + "s".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Whether the item may be attached to kmails and gifts.
    #[serde(default = "default_giftable")]
    pub giftable: bool,
}

const fn default_giftable() -> bool {
    true
}

impl Item {
    /// Creates a giftable item.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            plural: None,
            giftable: true,
        }
    }

    /// Sets the plural name.
    #[must_use]
    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    /// Marks the item as untradeable.
    #[must_use]
    pub const fn untradeable(mut self) -> Self {
        self.giftable = false;
        self
    }

    /// Returns the item id.
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns true if the item may be attached to outbound kmails.
    #[must_use]
    pub const fn is_giftable(&self) -> bool {
        self.giftable
    }

    /// Returns the plural name, defaulting to `name` + "s".
    #[must_use]
    pub fn plural_name(&self) -> String {
        self.plural
            .clone()
            .unwrap_or_else(|| format!("{}s", self.name))
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Item {}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Lookup into the game's item catalog.
pub trait ItemCatalog {
    /// Finds an item by singular or plural name, ignoring case.
    fn by_name(&self, name: &str) -> Option<&Item>;

    /// Finds an item by id.
    fn by_id(&self, id: ItemId) -> Option<&Item>;
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<Item>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<ItemId, usize>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a JSON array of items.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a list of items.
    pub fn from_json(json: &str) -> Result<Self> {
        let items: Vec<Item> = serde_json::from_str(json)?;
        Ok(items.into_iter().collect())
    }

    /// Adds an item, replacing any entry with the same id.
    pub fn insert(&mut self, item: Item) {
        let index = match self.by_id.get(&item.id) {
            Some(&index) => {
                let old = std::mem::replace(&mut self.items[index], item);
                for key in [old.name.to_lowercase(), old.plural_name().to_lowercase()] {
                    // Another item may own the key by now.
                    if self.by_name.get(&key) == Some(&index) {
                        self.by_name.remove(&key);
                    }
                }
                index
            }
            None => {
                self.items.push(item);
                self.items.len() - 1
            }
        };
        let item = &self.items[index];
        self.by_id.insert(item.id, index);
        self.by_name
            .entry(item.plural_name().to_lowercase())
            .or_insert(index);
        self.by_name.insert(item.name.to_lowercase(), index);
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}

impl FromIterator<Item> for StaticCatalog {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.insert(item);
        }
        catalog
    }
}

impl ItemCatalog for StaticCatalog {
    fn by_name(&self, name: &str) -> Option<&Item> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&index| &self.items[index])
    }

    fn by_id(&self, id: ItemId) -> Option<&Item> {
        self.by_id.get(&id).map(|&index| &self.items[index])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        [
            Item::new(1, "seal-clubbing club"),
            Item::new(2, "helmet turtle"),
            Item::new(7, "box of sunshine").with_plural("boxes of sunshine"),
            Item::new(25, "Mr. Accessory").untradeable(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup_by_name_ignores_case() {
        let catalog = catalog();
        assert_eq!(catalog.by_name("Helmet Turtle").unwrap().id, ItemId::new(2));
    }

    #[test]
    fn test_lookup_by_plural() {
        let catalog = catalog();
        assert_eq!(
            catalog.by_name("boxes of sunshine").unwrap().id,
            ItemId::new(7)
        );
        assert_eq!(
            catalog.by_name("seal-clubbing clubs").unwrap().id,
            ItemId::new(1)
        );
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = catalog();
        assert!(!catalog.by_id(ItemId::new(25)).unwrap().is_giftable());
        assert!(catalog.by_id(ItemId::new(999)).is_none());
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut catalog = catalog();
        catalog.insert(Item::new(2, "renamed turtle"));
        assert_eq!(catalog.len(), 4);
        assert!(catalog.by_name("helmet turtle").is_none());
        assert_eq!(catalog.by_name("renamed turtle").unwrap().id, ItemId::new(2));
    }

    #[test]
    fn test_replace_keeps_names_owned_by_other_items() {
        let mut catalog: StaticCatalog = [Item::new(1, "foo"), Item::new(2, "foos")]
            .into_iter()
            .collect();
        catalog.insert(Item::new(1, "bar"));

        assert_eq!(catalog.by_name("foos").unwrap().id, ItemId::new(2));
        assert_eq!(catalog.by_name("bar").unwrap().id, ItemId::new(1));
        assert!(catalog.by_name("foo").is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"id": 1, "name": "seal-clubbing club"},
            {"id": 25, "name": "Mr. Accessory", "giftable": false}
        ]"#;
        let catalog = StaticCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.by_id(ItemId::new(1)).unwrap().is_giftable());
        assert!(!catalog.by_name("mr. accessory").unwrap().is_giftable());
    }

    #[test]
    fn test_item_equality_by_id() {
        assert_eq!(Item::new(3, "a"), Item::new(3, "b"));
        assert_ne!(Item::new(3, "a"), Item::new(4, "a"));
    }
}
