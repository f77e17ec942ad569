//! Product storage behind a lock.
//!
//! Handlers only see the [`ProductStore`] trait. The in-memory implementation
//! keeps products in insertion order and hands out snapshots, so a listing
//! never observes a half-applied mutation.

use indexmap::IndexMap;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::model::{NewProduct, Product};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(Uuid),
}

/// Id-keyed product storage shared by all request handlers.
pub trait ProductStore: Send + Sync {
    /// Snapshot of every product in insertion order.
    fn list(&self) -> Vec<Product>;

    fn get(&self, id: Uuid) -> Option<Product>;

    /// Store a new product under a freshly generated id.
    fn create(&self, input: NewProduct) -> Product;

    /// Replace the product carrying the same id, keeping its position.
    fn update(&self, product: Product) -> Result<(), StoreError>;

    fn delete(&self, id: Uuid) -> Result<Product, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<IndexMap<Uuid, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the demo catalogue.
    pub fn with_catalogue() -> Self {
        let store = Self::new();
        for (name, brand, price, sku) in [
            ("Television", "Samsung", 1145.67, "S001"),
            ("Washing Machine", "LG", 114.67, "L001"),
            ("Laptop", "Apple", 11453.67, "A001"),
        ] {
            store.create(NewProduct {
                id: None,
                name: name.to_string(),
                brand: brand.to_string(),
                price,
                sku: sku.to_string(),
            });
        }
        store
    }
}

impl ProductStore for InMemoryProductStore {
    fn list(&self) -> Vec<Product> {
        self.products.read().values().cloned().collect()
    }

    fn get(&self, id: Uuid) -> Option<Product> {
        self.products.read().get(&id).cloned()
    }

    fn create(&self, input: NewProduct) -> Product {
        let product = input.into_product(Uuid::new_v4());
        self.products.write().insert(product.id, product.clone());
        product
    }

    fn update(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.products.write();
        let slot = products
            .get_mut(&product.id)
            .ok_or(StoreError::NotFound(product.id))?;
        *slot = product;
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<Product, StoreError> {
        self.products
            .write()
            .shift_remove(&id)
            .ok_or(StoreError::NotFound(id))
    }
}
