use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
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

use super::models::{CreateServiceableProduct, ServiceableProduct};
use super::service::ServiceableProductService;
use crate::error::MarketplaceResult;
use crate::store::Store;

/// OpenAPI documentation for Serviceable Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_serviceable, create_serviceable, delete_serviceable),
    components(
        schemas(ServiceableProduct, CreateServiceableProduct),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Serviceable Products", description = "Which shops can service which products")
    )
)]
pub struct ApiDoc;

pub fn router<S: Store<ServiceableProduct> + 'static>(
    service: ServiceableProductService<S>,
) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_serviceable).post(create_serviceable))
        .route("/{id}", delete(delete_serviceable))
        .with_state(shared_service)
}

/// List serviceable product links
#[utoipa::path(
    get,
    path = "",
    tag = "Serviceable Products",
    responses(
        (status = 200, description = "Links flagged serviceable", body = Vec<ServiceableProduct>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_serviceable<S: Store<ServiceableProduct>>(
    State(service): State<Arc<ServiceableProductService<S>>>,
) -> MarketplaceResult<Json<Vec<ServiceableProduct>>> {
    let links = service.list_serviceable().await?;
    Ok(Json(links))
}

/// Link a product to a shop
#[utoipa::path(
    post,
    path = "",
    tag = "Serviceable Products",
    request_body = CreateServiceableProduct,
    responses(
        (status = 201, description = "Link created", body = ServiceableProduct),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_serviceable<S: Store<ServiceableProduct>>(
    State(service): State<Arc<ServiceableProductService<S>>>,
    ValidatedJson(input): ValidatedJson<CreateServiceableProduct>,
) -> MarketplaceResult<impl IntoResponse> {
    let link = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// Remove a link
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Serviceable Products",
    params(
        ("id" = Uuid, Path, description = "Serviceable product ID")
    ),
    responses(
        (status = 204, description = "Link deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_serviceable<S: Store<ServiceableProduct>>(
    State(service): State<Arc<ServiceableProductService<S>>>,
    UuidPath(id): UuidPath,
) -> MarketplaceResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
