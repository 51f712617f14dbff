//! Cart Models

use jiff::Timestamp;
use uuid::Uuid;

use jaggery::{CartKeyed, PackingSelection, PriceTag, pricing};

/// A user's cart, populated with current product display data.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: Uuid,
    pub user: Uuid,
    pub items: Vec<CartItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// Sum of all line quantities, for badge display.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Total charged across all lines.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

/// A cart line joined against its product's current display fields.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub product: Uuid,
    pub title: String,
    pub image: String,
    pub price: u64,
    pub sale_price: u64,
    pub quantity: u32,
    pub packing: Option<PackingSelection>,
}

impl CartItem {
    /// The tag this line prices from: the packing selection when one was
    /// chosen, the product's own prices otherwise.
    #[must_use]
    pub fn price_tag(&self) -> PriceTag {
        pricing::resolve(
            PriceTag::new(self.price, self.sale_price),
            self.packing.as_ref(),
        )
    }

    /// Total charged for this line.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        pricing::line_total(self.price_tag(), self.quantity)
    }
}

impl CartKeyed for CartItem {
    fn product(&self) -> Uuid {
        self.product
    }

    fn packing_size(&self) -> Option<&str> {
        self.packing.as_ref().map(|p| p.size.as_str())
    }
}
