//! Wire types for the product and registration endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product in the catalogue.
///
/// Serializes to JSON with plain field names and to XML as a `<product>`
/// element with one child per field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename = "product")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub sku: String,
}

/// Payload accepted by `POST /products`. Any `id` sent by the client is
/// ignored; the store assigns a fresh one.
#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub sku: String,
}

impl NewProduct {
    pub fn into_product(self, id: Uuid) -> Product {
        Product {
            id,
            name: self.name,
            brand: self.brand,
            price: self.price,
            sku: self.sku,
        }
    }
}

/// URL-encoded body accepted by `POST /products/form`.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub sku: String,
}

impl From<ProductForm> for NewProduct {
    fn from(form: ProductForm) -> Self {
        Self {
            id: None,
            name: form.name,
            brand: form.brand,
            price: form.price,
            sku: form.sku,
        }
    }
}

/// Acknowledgement returned after a product is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedProduct {
    #[serde(rename = "productID")]
    pub product_id: Uuid,
}

/// Registration payload for a forum user. Required fields are optional here so
/// that missing values reach validation instead of failing deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub registration_date: Option<String>,
}

/// Business representation of a validated registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
}
