//! Jaggery
//!
//! Domain logic for a small storefront selling jaggery and karupatti:
//! price resolution for products and their packing variants, derived
//! variant statistics, and the composite-key cart line semantics shared
//! by the guest and server cart stores.

pub mod cart;
pub mod pricing;
pub mod products;

pub use cart::{CartKeyed, PackingSelection};
pub use pricing::PriceTag;
pub use products::{PackingSize, PackingSizes, VariantStats};
