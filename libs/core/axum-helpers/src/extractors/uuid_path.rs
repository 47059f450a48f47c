//! UUID path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// Single UUID path parameter.
///
/// ```ignore
/// async fn get_shop(UuidPath(id): UuidPath) -> String {
///     format!("Shop ID: {}", id)
/// }
///
/// let app = Router::new().route("/shops/{id}", get(get_shop));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        let id = Uuid::parse_str(&raw)?;
        Ok(UuidPath(id))
    }
}
