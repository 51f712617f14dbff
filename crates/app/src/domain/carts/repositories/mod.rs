//! Cart Repositories

mod carts;
mod items;

pub(crate) use carts::{CartRow, SqliteCartsRepository};
pub(crate) use items::SqliteCartItemsRepository;
