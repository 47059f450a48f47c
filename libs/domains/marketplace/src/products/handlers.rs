use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::models::{CreateProduct, Product, UpdateProduct};
use super::service::ProductService;
use crate::error::MarketplaceResult;
use crate::store::Store;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_product,
        list_by_category,
        create_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalogue")
    )
)]
pub struct ApiDoc;

/// Create the products router
pub fn router<S: Store<Product> + 'static>(service: ProductService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_product))
        .route("/category/{category_id}", get(list_by_category))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<S: Store<Product>>(
    State(service): State<Arc<ProductService<S>>>,
    UuidPath(id): UuidPath,
) -> MarketplaceResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// List the products in a category
#[utoipa::path(
    get,
    path = "/category/{category_id}",
    tag = "Products",
    params(
        ("category_id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_by_category<S: Store<Product>>(
    State(service): State<Arc<ProductService<S>>>,
    UuidPath(category_id): UuidPath,
) -> MarketplaceResult<Json<Vec<Product>>> {
    let products = service.find_by_category(category_id).await?;
    Ok(Json(products))
}

/// Add a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<S: Store<Product>>(
    State(service): State<Arc<ProductService<S>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> MarketplaceResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<S: Store<Product>>(
    State(service): State<Arc<ProductService<S>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> MarketplaceResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<S: Store<Product>>(
    State(service): State<Arc<ProductService<S>>>,
    UuidPath(id): UuidPath,
) -> MarketplaceResult<StatusCode> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
