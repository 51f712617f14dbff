//! Guest cart store.
//!
//! Best-effort by design: a shopper must never be blocked by a broken
//! storage slot, so every failure here is logged and degraded to "empty"
//! or "unchanged" instead of surfacing.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jaggery::{CartKeyed, PackingSelection, cart};

use super::storage::CartStorage;

/// A guest cart line. It has no server identity until merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestEntry {
    pub product: Uuid,
    pub quantity: u32,
    #[serde(default)]
    pub packing: Option<PackingSelection>,
    #[serde(default = "Timestamp::now")]
    pub added_at: Timestamp,
}

impl CartKeyed for GuestEntry {
    fn product(&self) -> Uuid {
        self.product
    }

    fn packing_size(&self) -> Option<&str> {
        self.packing.as_ref().map(|p| p.size.as_str())
    }
}

/// Cart for unauthenticated sessions, persisted through an injected
/// storage slot.
#[derive(Debug)]
pub struct GuestCartStore<S> {
    storage: S,
}

impl<S: CartStorage> GuestCartStore<S> {
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Current entries. An absent or corrupt slot is an empty cart.
    pub fn entries(&self) -> Vec<GuestEntry> {
        let payload = match self.storage.read() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Vec::new(),
            Err(error) => {
                tracing::warn!("failed to read guest cart: {error}");

                return Vec::new();
            }
        };

        match serde_json::from_str(&payload) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!("discarding corrupt guest cart: {error}");

                Vec::new()
            }
        }
    }

    /// Add to the `(product, packing size)` line, incrementing it when
    /// it already exists. Returns the updated entries.
    pub fn add(
        &self,
        product: Uuid,
        quantity: u32,
        packing: Option<PackingSelection>,
    ) -> Vec<GuestEntry> {
        let mut entries = self.entries();

        let size = packing.as_ref().map(|p| p.size.clone());

        match cart::find_line(&entries, product, size.as_deref()) {
            Some(index) => {
                if let Some(entry) = entries.get_mut(index) {
                    entry.quantity = entry.quantity.saturating_add(quantity);
                }
            }
            None => entries.push(GuestEntry {
                product,
                quantity,
                packing,
                added_at: Timestamp::now(),
            }),
        }

        self.persist(&entries);

        entries
    }

    /// Drop the line matching the composite key. Returns the updated
    /// entries.
    pub fn remove(&self, product: Uuid, packing_size: Option<&str>) -> Vec<GuestEntry> {
        let mut entries = self.entries();

        entries.retain(|entry| !entry.matches(product, packing_size));

        self.persist(&entries);

        entries
    }

    /// Overwrite a line's quantity; zero removes the line. Missing lines
    /// are left alone. Returns the updated entries.
    pub fn set_quantity(
        &self,
        product: Uuid,
        quantity: u32,
        packing_size: Option<&str>,
    ) -> Vec<GuestEntry> {
        let mut entries = self.entries();

        if quantity == 0 {
            entries.retain(|entry| !entry.matches(product, packing_size));
        } else if let Some(index) = cart::find_line(&entries, product, packing_size) {
            if let Some(entry) = entries.get_mut(index) {
                entry.quantity = quantity;
            }
        }

        self.persist(&entries);

        entries
    }

    /// Delete all guest entries.
    pub fn clear(&self) {
        if let Err(error) = self.storage.clear() {
            tracing::warn!("failed to clear guest cart: {error}");
        }
    }

    /// Sum of all quantities, for badge display.
    pub fn count(&self) -> u64 {
        self.entries()
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    fn persist(&self, entries: &[GuestEntry]) {
        let payload = match serde_json::to_string(entries) {
            Ok(payload) => payload,
            Err(error) => {
                tracing::warn!("failed to encode guest cart: {error}");

                return;
            }
        };

        if let Err(error) = self.storage.write(&payload) {
            tracing::warn!("failed to persist guest cart: {error}");
        }
    }
}
