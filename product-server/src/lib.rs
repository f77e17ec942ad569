//! HTTP service exposing an in-memory product catalogue and a forum
//! registration endpoint with field validation.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod products;
pub mod registration;
pub mod store;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use model::{CreatedProduct, NewProduct, Product, ProductForm, User, UserResource};
pub use registration::{LoggingRegistrar, RegisterUseCase};
pub use store::{InMemoryProductStore, ProductStore, StoreError};
pub use validation::{ErrorResult, FieldValidationError};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub registrations: Arc<dyn RegisterUseCase>,
}

impl AppState {
    pub fn new(
        products: impl ProductStore + 'static,
        registrations: impl RegisterUseCase + 'static,
    ) -> Self {
        Self {
            products: Arc::new(products),
            registrations: Arc::new(registrations),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(InMemoryProductStore::new(), LoggingRegistrar)
    }
}

/// Router over an empty store.
pub fn app() -> Router {
    router(AppState::default())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/products",
            get(products::list_products)
                .post(products::create_product)
                .put(products::update_product)
                .delete(products::delete_product)
                .options(products::allowed_methods),
        )
        .route("/products/error", get(products::fetch_product_with_error))
        .route("/products/form", post(products::submit_product_form))
        .route("/products/{id}", get(products::get_product))
        .route("/forums/{forum_id}/register", post(registration::register_user))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, AppState::default()).await
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}
