//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Categories and products stored in MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/category", api = domain_catalog::CategoryApiDoc),
        (path = "/product", api = domain_catalog::ProductApiDoc),
        (path = "/populate", api = domain_catalog::PopulateApiDoc)
    )
)]
pub struct ApiDoc;
