//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace API",
        version = "0.1.0",
        description = "Users, shops, products and serviceable products with proximity search",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/users", api = domain_marketplace::users::ApiDoc),
        (path = "/api/shops", api = domain_marketplace::shops::ApiDoc),
        (path = "/api/products", api = domain_marketplace::products::ApiDoc),
        (path = "/api/serviceable-products", api = domain_marketplace::serviceable_products::ApiDoc)
    )
)]
pub struct ApiDoc;
