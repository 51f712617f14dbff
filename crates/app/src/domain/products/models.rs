//! Product Models

use jiff::Timestamp;
use uuid::Uuid;

use jaggery::{PackingSizes, PriceTag, products};

/// Product Model
#[derive(Debug, Clone)]
pub struct Product {
    pub uuid: Uuid,
    pub title: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub price: u64,
    pub sale_price: u64,
    pub total_stock: u64,
    pub packing_sizes: PackingSizes,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// Product-level price tag, used when no packing variant is chosen.
    #[must_use]
    pub const fn price_tag(&self) -> PriceTag {
        PriceTag::new(self.price, self.sale_price)
    }

    /// Whether a packing variant must be chosen before this product can
    /// be added to a cart.
    #[must_use]
    pub fn requires_packing(&self) -> bool {
        products::requires_packing(&self.packing_sizes)
    }
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: Uuid,
    pub title: String,
    pub image: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub price: u64,
    pub sale_price: u64,
    pub total_stock: u64,
    pub packing_sizes: PackingSizes,
}

/// Product Update Model
///
/// `None` fields keep the stored value; a `Some` packing list replaces
/// the variants wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<u64>,
    pub sale_price: Option<u64>,
    pub total_stock: Option<u64>,
    pub packing_sizes: Option<PackingSizes>,
}
