//! Price resolution.
//!
//! Prices are whole currency units stored as unsigned integers. A sale
//! price of zero means "no sale price in effect"; resolution therefore
//! never divides and never touches floating-point currency values.

use serde::{Deserialize, Serialize};

use crate::cart::PackingSelection;

/// A base price paired with an optional sale price (zero when absent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTag {
    /// Pre-discount price.
    pub base: u64,

    /// Sale price; zero when no sale is in effect.
    pub sale: u64,
}

impl PriceTag {
    /// Pair a base price with a sale price.
    #[must_use]
    pub const fn new(base: u64, sale: u64) -> Self {
        Self { base, sale }
    }

    /// The price actually charged: the sale price when positive, the
    /// base price otherwise.
    #[must_use]
    pub const fn effective(&self) -> u64 {
        if self.sale > 0 { self.sale } else { self.base }
    }

    /// The pre-discount price to render struck through, or `None` when
    /// no sale price is in effect.
    #[must_use]
    pub const fn strikethrough(&self) -> Option<u64> {
        if self.sale > 0 { Some(self.base) } else { None }
    }

    /// The discount badge percentage for this tag.
    #[must_use]
    pub fn discount_percent(&self) -> u32 {
        discount_percent(self.base, self.effective())
    }
}

/// Resolves the tag a cart line prices from: the packing selection's own
/// prices when a variant was chosen, the product's prices otherwise.
#[must_use]
pub fn resolve(product: PriceTag, selection: Option<&PackingSelection>) -> PriceTag {
    match selection {
        Some(packing) => PriceTag::new(packing.price, packing.sale_price),
        None => product,
    }
}

/// Percentage saved when `effective` is charged instead of `base`,
/// rounded half away from zero.
///
/// Defined only when both inputs are positive and `effective` does not
/// exceed `base`; zero otherwise, so a zero base never divides.
#[must_use]
pub fn discount_percent(base: u64, effective: u64) -> u32 {
    if base == 0 || effective == 0 || effective > base {
        return 0;
    }

    let saved = base - effective;

    // Integer round-half-up of (saved / base) * 100.
    let percent = (saved * 200 + base) / (2 * base);

    u32::try_from(percent).unwrap_or(100)
}

/// Total charged for `quantity` units priced by `tag`.
#[must_use]
pub fn line_total(tag: PriceTag, quantity: u32) -> u64 {
    tag.effective() * u64::from(quantity)
}
