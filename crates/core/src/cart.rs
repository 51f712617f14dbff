//! Cart line identity.
//!
//! A cart is a mapping keyed by `(product, packing size)`, where a line
//! without a chosen packing occupies the product's "default" slot. Both
//! cart stores (guest-side and server-side) and the merger share this
//! matcher so that adding an existing key always increments the one
//! existing line instead of duplicating it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::PriceTag;

/// The packing variant chosen for a cart line, with the prices that were
/// in effect at selection time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingSelection {
    /// Variant label, e.g. `"500g"`.
    pub size: String,

    /// Base price of the chosen variant.
    pub price: u64,

    /// Sale price of the chosen variant; zero when none.
    #[serde(default)]
    pub sale_price: u64,
}

impl PackingSelection {
    /// Price tag carried by this selection.
    #[must_use]
    pub const fn price_tag(&self) -> PriceTag {
        PriceTag::new(self.price, self.sale_price)
    }
}

/// Anything addressable by the composite cart line key.
pub trait CartKeyed {
    /// Product the line refers to.
    fn product(&self) -> Uuid;

    /// Chosen packing size, or `None` for the product's default slot.
    fn packing_size(&self) -> Option<&str>;

    /// Whether this line occupies the `(product, size)` slot.
    fn matches(&self, product: Uuid, size: Option<&str>) -> bool {
        self.product() == product && self.packing_size() == size
    }
}

/// Position of the line occupying the `(product, size)` slot, if any.
pub fn find_line<L: CartKeyed>(lines: &[L], product: Uuid, size: Option<&str>) -> Option<usize> {
    lines.iter().position(|line| line.matches(product, size))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line {
        product: Uuid,
        packing: Option<PackingSelection>,
    }

    impl CartKeyed for Line {
        fn product(&self) -> Uuid {
            self.product
        }

        fn packing_size(&self) -> Option<&str> {
            self.packing.as_ref().map(|p| p.size.as_str())
        }
    }

    fn selection(size: &str) -> PackingSelection {
        PackingSelection {
            size: size.to_string(),
            price: 300,
            sale_price: 0,
        }
    }

    #[test]
    fn lines_with_different_sizes_occupy_different_slots() {
        let product = Uuid::now_v7();

        let lines = [
            Line {
                product,
                packing: Some(selection("500g")),
            },
            Line {
                product,
                packing: Some(selection("1kg")),
            },
        ];

        assert_eq!(find_line(&lines, product, Some("500g")), Some(0));
        assert_eq!(find_line(&lines, product, Some("1kg")), Some(1));
        assert_eq!(find_line(&lines, product, None), None);
    }

    #[test]
    fn default_slot_is_distinct_from_variant_slots() {
        let product = Uuid::now_v7();

        let lines = [Line {
            product,
            packing: None,
        }];

        assert_eq!(find_line(&lines, product, None), Some(0));
        assert_eq!(find_line(&lines, product, Some("500g")), None);
    }

    #[test]
    fn other_products_never_match() {
        let lines = [Line {
            product: Uuid::now_v7(),
            packing: None,
        }];

        assert_eq!(find_line(&lines, Uuid::now_v7(), None), None);
    }
}
