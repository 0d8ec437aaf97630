use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::api::extract::JsonObject;
use crate::domain::models::{CreateProductRequest, Product, UpdateProductRequest};
use crate::domain::services::ProductService;
use crate::domain::validation::{validate, Shape, CREATE_PRODUCT, UPDATE_PRODUCT};
use crate::error::AppError;
use crate::server::AppState;
use crate::utils::id::parse_id;

// 找不到记录时仍返回 200 + 文本
pub const UNREGISTERED_PRODUCT: &str = "unregistered product";
pub const PRODUCT_NOT_EXIST: &str = "this product not exist";
pub const PRODUCT_REMOVED: &str = "product has been removed";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn into_dto<T: DeserializeOwned>(shape: &Shape, payload: Map<String, Value>) -> Result<T, AppError> {
    validate(shape, &payload)?;
    serde_json::from_value(Value::Object(payload)).map_err(|e| AppError::BadRequest(e.to_string()))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = [Product]),
        (status = 500, description = "Store unavailable"),
    )
)]
pub async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Product>>, AppError> {
    let product_service = ProductService::new(state.repository.clone());

    let products = product_service.get_all().await?;

    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product, or the text `unregistered product` when it does not exist", body = Product),
        (status = 500, description = "Store unavailable"),
    )
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let product_service = ProductService::new(state.repository.clone());

    let product = match parse_id(&id) {
        Some(id) => product_service.get_one(id).await?,
        None => None,
    };

    Ok(match product {
        Some(product) => Json(product).into_response(),
        None => UNREGISTERED_PRODUCT.into_response(),
    })
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "The created product", body = Product),
        (status = 400, description = "Joined validation messages", body = String),
        (status = 500, description = "Store unavailable"),
    )
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    JsonObject(payload): JsonObject,
) -> Result<Json<Product>, AppError> {
    let request: CreateProductRequest = into_dto(&CREATE_PRODUCT, payload)?;

    let product_service = ProductService::new(state.repository.clone());

    let product = product_service.create(request).await?;

    Ok(Json(product))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "The updated product, or the text `this product not exist`", body = Product),
        (status = 400, description = "Joined validation messages", body = String),
        (status = 500, description = "Store unavailable"),
    )
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonObject(payload): JsonObject,
) -> Result<Response, AppError> {
    let request: UpdateProductRequest = into_dto(&UPDATE_PRODUCT, payload)?;

    let product_service = ProductService::new(state.repository.clone());

    let product = match parse_id(&id) {
        Some(id) => product_service.update(id, request).await?,
        None => None,
    };

    Ok(match product {
        Some(product) => Json(product).into_response(),
        None => PRODUCT_NOT_EXIST.into_response(),
    })
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "`product has been removed` or `this product not exist`", body = String),
        (status = 500, description = "Store unavailable"),
    )
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<&'static str, AppError> {
    let product_service = ProductService::new(state.repository.clone());

    let removed = match parse_id(&id) {
        Some(id) => product_service.delete(id).await?,
        None => None,
    };

    Ok(if removed.is_some() { PRODUCT_REMOVED } else { PRODUCT_NOT_EXIST })
}
