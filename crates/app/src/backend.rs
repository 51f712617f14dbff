//! Cart backends.
//!
//! The guest store and the server store expose one interface so a
//! session picks its backend once (at sign-in) instead of branching on
//! authentication state inside every cart action.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use jaggery::PackingSelection;

use crate::{
    domain::carts::{CartsService, CartsServiceError},
    guest::{CartStorage, GuestCartStore},
};

/// The cart operations a session needs, independent of where the cart
/// lives.
#[async_trait]
pub trait CartBackend: Send + Sync {
    /// Add to the `(product, packing size)` line, additively.
    async fn add(
        &self,
        product: Uuid,
        quantity: u32,
        packing: Option<PackingSelection>,
    ) -> Result<(), CartsServiceError>;

    /// Drop the line matching the composite key.
    async fn remove(
        &self,
        product: Uuid,
        packing_size: Option<String>,
    ) -> Result<(), CartsServiceError>;

    /// Set a line's quantity; zero removes the line.
    async fn set_quantity(
        &self,
        product: Uuid,
        quantity: u32,
        packing_size: Option<String>,
    ) -> Result<(), CartsServiceError>;

    /// Sum of all quantities, for badge display.
    async fn count(&self) -> Result<u64, CartsServiceError>;
}

/// Guest backend: best-effort local storage, never fails.
#[async_trait]
impl<S: CartStorage> CartBackend for GuestCartStore<S> {
    async fn add(
        &self,
        product: Uuid,
        quantity: u32,
        packing: Option<PackingSelection>,
    ) -> Result<(), CartsServiceError> {
        GuestCartStore::add(self, product, quantity, packing);

        Ok(())
    }

    async fn remove(
        &self,
        product: Uuid,
        packing_size: Option<String>,
    ) -> Result<(), CartsServiceError> {
        GuestCartStore::remove(self, product, packing_size.as_deref());

        Ok(())
    }

    async fn set_quantity(
        &self,
        product: Uuid,
        quantity: u32,
        packing_size: Option<String>,
    ) -> Result<(), CartsServiceError> {
        GuestCartStore::set_quantity(self, product, quantity, packing_size.as_deref());

        Ok(())
    }

    async fn count(&self) -> Result<u64, CartsServiceError> {
        Ok(GuestCartStore::count(self))
    }
}

/// Authenticated backend: the server cart store, bound to one user.
#[derive(Clone)]
pub struct UserCartBackend {
    carts: Arc<dyn CartsService>,
    user: Uuid,
}

impl UserCartBackend {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsService>, user: Uuid) -> Self {
        Self { carts, user }
    }
}

#[async_trait]
impl CartBackend for UserCartBackend {
    async fn add(
        &self,
        product: Uuid,
        quantity: u32,
        packing: Option<PackingSelection>,
    ) -> Result<(), CartsServiceError> {
        self.carts
            .add_to_cart(self.user, product, quantity, packing)
            .await?;

        Ok(())
    }

    async fn remove(
        &self,
        product: Uuid,
        packing_size: Option<String>,
    ) -> Result<(), CartsServiceError> {
        self.carts
            .delete_item(self.user, product, packing_size)
            .await?;

        Ok(())
    }

    async fn set_quantity(
        &self,
        product: Uuid,
        quantity: u32,
        packing_size: Option<String>,
    ) -> Result<(), CartsServiceError> {
        // The "at least 1, else delete" rule lives client-side; the
        // server rejects zero quantities outright.
        if quantity == 0 {
            self.carts
                .delete_item(self.user, product, packing_size)
                .await?;
        } else {
            self.carts
                .update_quantity(self.user, product, quantity, packing_size)
                .await?;
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, CartsServiceError> {
        match self.carts.fetch_cart(self.user).await {
            Ok(cart) => Ok(cart.count()),
            Err(CartsServiceError::NotFound) => Ok(0),
            Err(error) => Err(error),
        }
    }
}
