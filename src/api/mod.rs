//! REST API layer: route handlers, response middleware, router composition.
//!
//! All endpoints are mounted under `/api`.

pub mod handlers;
pub mod middleware;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::domain::Employee;

/// OpenAPI document for the employee endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "employee-api", description = "CRUD over the employee table"),
    paths(
        handlers::employee::list_employees,
        handlers::employee::create_employee,
        handlers::employee::get_employee,
        handlers::employee::update_employee,
        handlers::employee::delete_employee,
    ),
    components(schemas(Employee)),
    tags((name = "Employees", description = "Employee records"))
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
///
/// With the `swagger-ui` feature the interactive docs are served at
/// `/swagger-ui` and the document at `/api-docs/openapi.json`.
pub fn build_router() -> Router<AppState> {
    let router = Router::new().nest("/api", handlers::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}
