use axum::{routing::get, Json, Router};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::api::products;
use crate::domain::models::{CreateProductRequest, Product, UpdateProductRequest};
use crate::server::AppState;

#[derive(OpenApi)]
#[openapi(
    info(title = "Product API", version = "1.0.0", description = "A simple product CRUD API"),
    paths(
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
    ),
    components(schemas(Product, CreateProductRequest, UpdateProductRequest)),
    tags((name = "products", description = "Product management"))
)]
pub struct ApiDoc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
}
