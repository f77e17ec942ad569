//! Domain DTOs for the product API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently, so
//! the client does not pull in axum. Integration tests catch any schema drift
//! between the two crates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product as exchanged with the API, in JSON or XML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "product")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub sku: String,
}

impl Product {
    /// A new product with a freshly generated id.
    pub fn new(name: &str, brand: &str, price: f64, sku: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            brand: brand.to_string(),
            price,
            sku: sku.to_string(),
        }
    }
}

/// Response body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedProduct {
    #[serde(rename = "productID")]
    pub product_id: Uuid,
}

/// Fields submitted URL-encoded to the form endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub sku: String,
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price,
            sku: product.sku.clone(),
        }
    }
}
