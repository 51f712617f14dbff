//! Packing variants and derived product statistics.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::pricing::PriceTag;

/// A purchasable packing variant of a product, carrying its own pricing
/// and stock independent of the parent product's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingSize {
    /// Variant label, e.g. `"250g"`, `"500g"`, `"1kg"`.
    pub size: String,

    /// Base price for this variant.
    pub price: u64,

    /// Sale price for this variant; zero when no sale is in effect.
    #[serde(default)]
    pub sale_price: u64,

    /// Stock held for this variant alone.
    #[serde(default)]
    pub stock: u64,
}

impl PackingSize {
    /// Price tag for this variant.
    #[must_use]
    pub const fn price_tag(&self) -> PriceTag {
        PriceTag::new(self.price, self.sale_price)
    }
}

/// The packing variants of a product, in display order.
pub type PackingSizes = SmallVec<[PackingSize; 3]>;

/// Product-level figures derived from packing variants.
///
/// When a product has variants, its own `price`, `sale_price` and
/// `total_stock` are not authoritative: they are recomputed from the
/// variants on every create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantStats {
    /// Minimum positive base price across variants; zero when none.
    pub price: u64,

    /// Minimum positive sale price across variants; zero when none.
    pub sale_price: u64,

    /// Sum of variant stock.
    pub total_stock: u64,
}

impl VariantStats {
    /// Derives product-level figures from a variant list.
    #[must_use]
    pub fn from_packings(packings: &[PackingSize]) -> Self {
        let price = packings
            .iter()
            .map(|p| p.price)
            .filter(|price| *price > 0)
            .min()
            .unwrap_or(0);

        let sale_price = packings
            .iter()
            .map(|p| p.sale_price)
            .filter(|sale| *sale > 0)
            .min()
            .unwrap_or(0);

        let total_stock = packings.iter().map(|p| p.stock).sum();

        Self {
            price,
            sale_price,
            total_stock,
        }
    }
}

/// Whether a product with these variants must have one chosen before it
/// can be added to a cart.
#[must_use]
pub fn requires_packing(packings: &[PackingSize]) -> bool {
    !packings.is_empty()
}
