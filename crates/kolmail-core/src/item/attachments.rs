//! Item attachments for outbound kmails and gifts.

use std::collections::HashMap;

use kolmail_protocol::ItemId;

use super::Item;

/// Attachments as supplied by a caller.
///
/// Either a plain sequence of items, where repeats count as extra copies,
/// or a list of already counted pairs. Both normalize to an
/// [`AttachmentSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachments {
    /// One entry per copy.
    Items(Vec<Item>),
    /// Item and quantity pairs.
    Counted(Vec<(Item, u32)>),
}

impl Attachments {
    /// No attachments.
    #[must_use]
    pub const fn none() -> Self {
        Self::Counted(Vec::new())
    }

    /// Collapses the input into a canonical set.
    #[must_use]
    pub fn normalize(&self) -> AttachmentSet {
        match self {
            Self::Items(items) => items.iter().cloned().map(|item| (item, 1)).collect(),
            Self::Counted(pairs) => pairs.iter().cloned().collect(),
        }
    }
}

impl Default for Attachments {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<Item>> for Attachments {
    fn from(items: Vec<Item>) -> Self {
        Self::Items(items)
    }
}

impl From<Vec<(Item, u32)>> for Attachments {
    fn from(pairs: Vec<(Item, u32)>) -> Self {
        Self::Counted(pairs)
    }
}

impl From<HashMap<Item, u32>> for Attachments {
    fn from(map: HashMap<Item, u32>) -> Self {
        let mut pairs: Vec<(Item, u32)> = map.into_iter().collect();
        pairs.sort_by_key(|(item, _)| item.id);
        Self::Counted(pairs)
    }
}

impl From<AttachmentSet> for Attachments {
    fn from(set: AttachmentSet) -> Self {
        Self::Counted(set.entries)
    }
}

/// Ordered mapping from item to a positive quantity.
///
/// Entries keep the order in which each item was first seen; adding an
/// item again increases its quantity. Zero quantities are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    entries: Vec<(Item, u32)>,
}

impl AttachmentSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds `quantity` copies of `item`.
    pub fn add(&mut self, item: Item, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.entries.iter_mut().find(|(existing, _)| *existing == item) {
            Some((_, count)) => *count = count.saturating_add(quantity),
            None => self.entries.push((item, quantity)),
        }
    }

    /// Returns the quantity held for an item, or 0.
    #[must_use]
    pub fn quantity(&self, id: ItemId) -> u32 {
        self.entries
            .iter()
            .find(|(item, _)| item.id == id)
            .map_or(0, |(_, quantity)| *quantity)
    }

    /// Returns the number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over item and quantity pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Item, u32)> {
        self.entries.iter().map(|(item, quantity)| (item, *quantity))
    }

    /// Splits into the giftable subset and the dropped items.
    #[must_use]
    pub fn split_giftable(self) -> (Self, Vec<Item>) {
        let (giftable, dropped): (Vec<_>, Vec<_>) = self
            .entries
            .into_iter()
            .partition(|(item, _)| item.is_giftable());
        (
            Self { entries: giftable },
            dropped.into_iter().map(|(item, _)| item).collect(),
        )
    }

    /// Splits into consecutive groups of at most `size` `(id, quantity)` pairs.
    ///
    /// An empty set yields a single empty group, so that a Meat-only or
    /// bare message still produces exactly one request.
    #[must_use]
    pub fn groups(&self, size: usize) -> Vec<Vec<(ItemId, u32)>> {
        let pairs: Vec<(ItemId, u32)> = self
            .entries
            .iter()
            .map(|(item, quantity)| (item.id, *quantity))
            .collect();
        if pairs.is_empty() {
            return vec![Vec::new()];
        }
        pairs.chunks(size.max(1)).map(<[_]>::to_vec).collect()
    }
}

impl FromIterator<(Item, u32)> for AttachmentSet {
    fn from_iter<T: IntoIterator<Item = (Item, u32)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (item, quantity) in iter {
            set.add(item, quantity);
        }
        set
    }
}
