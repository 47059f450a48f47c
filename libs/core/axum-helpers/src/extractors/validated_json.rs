//! JSON body extractor with `validator` checks.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed `Validate`.
///
/// Every failure is a 400: bad syntax, wrong shape, missing content type and
/// field constraint violations. Only the last one carries per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 1))]
///     product_name: String,
///     #[validate(range(min = 0.0))]
///     price: f64,
/// }
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProduct>) -> String {
///     input.product_name
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    #[serde(deny_unknown_fields)]
    struct Input {
        #[validate(length(min = 1))]
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(input): ValidatedJson<Input>| async move { input.name }),
        )
    }

    async fn post_json(body: &'static str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let (status, _) = post_json(r#"{"name":"ok"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_syntax_error_is_400() {
        let (status, body) = post_json(r#"{"name":"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_unknown_or_missing_fields_are_400() {
        let (status, body) = post_json(r#"{"name":"ok","extra":1}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "JSON_EXTRACTION");

        let (status, _) = post_json(r#"{}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_constraint_violation_has_details() {
        let (status, body) = post_json(r#"{"name":""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["details"]["name"].is_array());
    }
}
