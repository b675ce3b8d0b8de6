use serde::Serialize;

use crate::types::item::{Item, ItemId, LicenseTier, Price};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartEntry {
    pub item_id: ItemId,
    pub tier: LicenseTier,
    /// Price of `tier` captured when the entry was created or re-tiered.
    pub unit_price: Price,
}

/// Items chosen for purchase, in the order they were added.
/// Holds at most one entry per item id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    /// Adds `item` at its base (WAV) price. No-op if already present.
    pub fn add(&mut self, item: &Item) -> bool {
        self.add_with_tier(item, LicenseTier::Wav)
    }

    /// Adds `item` at `tier`. Returns false, leaving the cart untouched,
    /// when the item is already in the cart under any tier.
    pub fn add_with_tier(&mut self, item: &Item, tier: LicenseTier) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.entries.push(CartEntry {
            item_id: item.id,
            tier,
            unit_price: item.price(tier),
        });
        log::debug!("Added item {} ({}) to cart", item.id, tier);
        true
    }

    /// Re-prices an existing entry at another tier. No-op if absent.
    pub fn set_tier(&mut self, item: &Item, tier: LicenseTier) -> bool {
        match self.entries.iter_mut().find(|e| e.item_id == item.id) {
            Some(entry) => {
                entry.tier = tier;
                entry.unit_price = item.price(tier);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, item_id: ItemId) -> Option<CartEntry> {
        let idx = self.entries.iter().position(|e| e.item_id == item_id)?;
        Some(self.entries.remove(idx))
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.entries.iter().any(|e| e.item_id == item_id)
    }

    /// Sum of entry prices, recomputed on every call.
    pub fn total(&self) -> Price {
        self.entries.iter().map(|e| e.unit_price).sum()
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
