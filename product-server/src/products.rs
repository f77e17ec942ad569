//! Product catalogue handlers.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::format::Format;
use crate::model::{CreatedProduct, NewProduct, Product, ProductForm};
use crate::AppState;

pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, PUT, DELETE, OPTIONS";

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.products.list())
}

pub async fn allowed_methods() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, ALLOWED_METHODS)])
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let product = state.products.get(id).ok_or(ApiError::NotFound(id))?;
    Format::from_accept(&headers).respond(&product)
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Response {
    created(&state, input)
}

pub async fn submit_product_form(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    created(&state, form.into())
}

fn created(state: &AppState, input: NewProduct) -> Response {
    let product = state.products.create(input);
    info!(product_id = %product.id, sku = %product.sku, "product created");
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/products/{}", product.id))],
        Json(CreatedProduct {
            product_id: product.id,
        }),
    )
        .into_response()
}

pub async fn update_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<StatusCode, ApiError> {
    let id = product.id;
    state.products.update(product)?;
    info!(product_id = %id, "product updated");
    Ok(StatusCode::OK)
}

pub async fn delete_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<StatusCode, ApiError> {
    state.products.delete(product.id)?;
    info!(product_id = %product.id, "product deleted");
    Ok(StatusCode::OK)
}

/// Always fails; lets clients exercise their error handling.
pub async fn fetch_product_with_error() -> StatusCode {
    StatusCode::BAD_REQUEST
}
