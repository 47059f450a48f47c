use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
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

use super::models::{CreateUser, UpdateUser, User, UserResponse};
use super::service::UserService;
use crate::error::MarketplaceResult;
use crate::geo::NearbyParams;
use crate::store::Store;

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_user,
        get_user_by_username,
        create_user,
        update_user,
        delete_user,
        find_nearby_users,
    ),
    components(
        schemas(UserResponse, CreateUser, UpdateUser),
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
        (name = "Users", description = "User registration, lookup and proximity search")
    )
)]
pub struct ApiDoc;

/// Create the users router
///
/// Literal segments (`/add`, `/nearby`) take precedence over `/{key}`.
pub fn router<S: Store<User> + 'static>(service: UserService<S>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/add", post(create_user))
        .route("/nearby", get(find_nearby_users))
        .route("/username/{username}", get(get_user_by_username))
        .route("/update/{id}", put(update_user))
        .route("/{key}", get(get_user).delete(delete_user))
        .with_state(shared_service)
}

/// Get a user by id, falling back to username
#[utoipa::path(
    get,
    path = "/{key}",
    tag = "Users",
    params(
        ("key" = String, Path, description = "User id or username")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<S: Store<User>>(
    State(service): State<Arc<UserService<S>>>,
    Path(key): Path<String>,
) -> MarketplaceResult<Json<UserResponse>> {
    let user = service.lookup(&key).await?;
    Ok(Json(user))
}

/// Get a user by username
#[utoipa::path(
    get,
    path = "/username/{username}",
    tag = "Users",
    params(
        ("username" = String, Path, description = "Username")
    ),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_by_username<S: Store<User>>(
    State(service): State<Arc<UserService<S>>>,
    Path(username): Path<String>,
) -> MarketplaceResult<Json<UserResponse>> {
    let user = service.get_user_by_username(&username).await?;
    Ok(Json(user))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/add",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<S: Store<User>>(
    State(service): State<Arc<UserService<S>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> MarketplaceResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = "Users",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<S: Store<User>>(
    State(service): State<Arc<UserService<S>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> MarketplaceResult<Json<UserResponse>> {
    let user = service.update_user(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{key}",
    tag = "Users",
    params(
        ("key" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<S: Store<User>>(
    State(service): State<Arc<UserService<S>>>,
    UuidPath(id): UuidPath,
) -> MarketplaceResult<StatusCode> {
    service.delete_user(id).await?;
    Ok(StatusCode::OK)
}

/// Users within `radius` meters of a point, nearest first
#[utoipa::path(
    get,
    path = "/nearby",
    tag = "Users",
    params(NearbyParams),
    responses(
        (status = 200, description = "Users ordered by distance", body = Vec<UserResponse>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn find_nearby_users<S: Store<User>>(
    State(service): State<Arc<UserService<S>>>,
    QueryParams(params): QueryParams<NearbyParams>,
) -> MarketplaceResult<Json<Vec<UserResponse>>> {
    let (center, radius) = params.parse()?;
    let users = service.find_nearby(center, radius).await?;
    Ok(Json(users))
}
