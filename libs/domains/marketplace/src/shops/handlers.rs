use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    QueryParams, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestQueryResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        ConflictResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::models::{CreateShop, Shop, UpdateShop};
use super::service::ShopService;
use crate::error::MarketplaceResult;
use crate::geo::NearbyParams;
use crate::store::Store;

/// OpenAPI documentation for Shops API
#[derive(OpenApi)]
#[openapi(
    paths(get_shop, create_shop, update_shop, delete_shop, find_nearby_shops),
    components(
        schemas(Shop, CreateShop, UpdateShop),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            BadRequestQueryResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Shops", description = "Shop management and proximity search")
    )
)]
pub struct ApiDoc;

/// Create the shops router
pub fn router<S: Store<Shop> + 'static>(service: ShopService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_shop).put(update_shop))
        .route("/nearby", get(find_nearby_shops))
        .route("/{id}", get(get_shop).delete(delete_shop))
        .with_state(shared_service)
}

/// Get a shop by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Shops",
    params(
        ("id" = Uuid, Path, description = "Shop ID")
    ),
    responses(
        (status = 200, description = "Shop found", body = Shop),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_shop<S: Store<Shop>>(
    State(service): State<Arc<ShopService<S>>>,
    UuidPath(id): UuidPath,
) -> MarketplaceResult<Json<Shop>> {
    let shop = service.get_shop(id).await?;
    Ok(Json(shop))
}

/// Open a new shop
#[utoipa::path(
    post,
    path = "",
    tag = "Shops",
    request_body = CreateShop,
    responses(
        (status = 201, description = "Shop created", body = Shop),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_shop<S: Store<Shop>>(
    State(service): State<Arc<ShopService<S>>>,
    ValidatedJson(input): ValidatedJson<CreateShop>,
) -> MarketplaceResult<impl IntoResponse> {
    let shop = service.create_shop(input).await?;
    Ok((StatusCode::CREATED, Json(shop)))
}

/// Update the shop named by `id` in the body
#[utoipa::path(
    put,
    path = "",
    tag = "Shops",
    request_body = UpdateShop,
    responses(
        (status = 204, description = "Shop updated"),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_shop<S: Store<Shop>>(
    State(service): State<Arc<ShopService<S>>>,
    ValidatedJson(input): ValidatedJson<UpdateShop>,
) -> MarketplaceResult<StatusCode> {
    service.update_shop(input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Close a shop
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Shops",
    params(
        ("id" = Uuid, Path, description = "Shop ID")
    ),
    responses(
        (status = 204, description = "Shop deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_shop<S: Store<Shop>>(
    State(service): State<Arc<ShopService<S>>>,
    UuidPath(id): UuidPath,
) -> MarketplaceResult<StatusCode> {
    service.delete_shop(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Shops within `radius` meters of a point, nearest first
#[utoipa::path(
    get,
    path = "/nearby",
    tag = "Shops",
    params(NearbyParams),
    responses(
        (status = 200, description = "Shops ordered by distance", body = Vec<Shop>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_nearby_shops<S: Store<Shop>>(
    State(service): State<Arc<ShopService<S>>>,
    QueryParams(params): QueryParams<NearbyParams>,
) -> MarketplaceResult<Json<Vec<Shop>>> {
    let (center, radius) = params.parse()?;
    let shops = service.find_nearby(center, radius).await?;
    Ok(Json(shops))
}
