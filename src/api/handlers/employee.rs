//! Employee CRUD handlers: list, create, get, update, delete.

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use serde::Serialize;

use crate::api::middleware::with_response_headers;
use crate::app_state::AppState;
use crate::domain::{Employee, EmployeeId};
use crate::error::ApiError;

/// `GET /api/employee` — List all employees.
///
/// # Errors
///
/// Returns [`ApiError::Store`] if the query fails.
#[utoipa::path(
    get,
    path = "/api/employee",
    tag = "Employees",
    summary = "List employees",
    description = "Returns every employee row in the store's natural order.",
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 500, description = "Query failed"),
    )
)]
pub async fn list_employees(State(state): State<AppState>) -> Result<Response, ApiError> {
    let employees = state.store.list_employees().await?;
    json_response(StatusCode::OK, &employees)
}

/// `POST /api/employee` — Insert an employee with a caller-supplied id.
///
/// Responds with `{"id}: <n>}`. The key is malformed on purpose; existing
/// clients match on this exact body.
///
/// # Errors
///
/// Returns [`ApiError::MalformedBody`] on undecodable JSON and
/// [`ApiError::InsertFailed`] if the store rejects the row.
#[utoipa::path(
    post,
    path = "/api/employee",
    tag = "Employees",
    summary = "Create an employee",
    description = "Inserts one employee row. The id is supplied by the caller.",
    request_body = Employee,
    responses(
        (status = 201, description = "Employee created; body is `{\"id}: <n>}`", body = String),
        (status = 400, description = "Malformed body or insert rejected"),
    )
)]
pub async fn create_employee(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let employee = decode_employee(&body)?;
    let inserted_id = state
        .store
        .insert_employee(&employee)
        .await
        .map_err(ApiError::InsertFailed)?;

    Ok((StatusCode::CREATED, created_body(inserted_id)))
}

/// `OPTIONS /api/employee` — CORS pre-flight.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// `GET /api/employee/{id}` — Fetch one employee.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] for a non-integer id,
/// [`ApiError::Absent`] if no row matches and [`ApiError::Store`] if the
/// query fails.
#[utoipa::path(
    get,
    path = "/api/employee/{id}",
    tag = "Employees",
    summary = "Get an employee",
    description = "Returns the employee with the given id. A missing row is reported as 500.",
    params(
        ("id" = i64, Path, description = "Employee id"),
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, description = "More than one trailing path segment"),
        (status = 404, description = "Id is not an integer"),
        (status = 500, description = "Employee absent or query failed"),
    )
)]
pub async fn get_employee(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_item_id(&segment)?;
    let employee = state
        .store
        .get_employee(id)
        .await?
        .ok_or(ApiError::Absent(id))?;
    json_response(StatusCode::OK, &employee)
}

/// `PUT /api/employee/{id}` — Replace an employee.
///
/// All eight columns are overwritten, including the id itself. Updating a
/// missing id succeeds without creating a row.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] for a non-integer id,
/// [`ApiError::MalformedBody`] on undecodable JSON and [`ApiError::Store`]
/// if the update fails.
#[utoipa::path(
    put,
    path = "/api/employee/{id}",
    tag = "Employees",
    summary = "Update an employee",
    description = "Overwrites every field of the employee matching the path id.",
    params(
        ("id" = i64, Path, description = "Employee id"),
    ),
    request_body = Employee,
    responses(
        (status = 200, description = "Update applied (or no row matched)"),
        (status = 400, description = "Malformed body or extra path segments"),
        (status = 404, description = "Id is not an integer"),
        (status = 500, description = "Update failed"),
    )
)]
pub async fn update_employee(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let id = parse_item_id(&segment)?;
    let employee = decode_employee(&body)?;
    state.store.update_employee(id, &employee).await?;
    Ok(StatusCode::OK)
}

/// `DELETE /api/employee/{id}` — Remove an employee.
///
/// Deleting a missing id succeeds.
///
/// # Errors
///
/// Returns [`ApiError::InvalidId`] for a non-integer id and
/// [`ApiError::Store`] if the delete fails.
#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    tag = "Employees",
    summary = "Delete an employee",
    description = "Removes the employee with the given id. Idempotent.",
    params(
        ("id" = i64, Path, description = "Employee id"),
    ),
    responses(
        (status = 200, description = "Employee removed (or never existed)"),
        (status = 400, description = "More than one trailing path segment"),
        (status = 404, description = "Id is not an integer"),
        (status = 500, description = "Delete failed"),
    )
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_item_id(&segment)?;
    state.store.remove_employee(id).await?;
    Ok(StatusCode::OK)
}

/// `OPTIONS /api/employee/{id}` — CORS pre-flight for item writes.
///
/// # Errors
///
/// Returns [`ApiError::ExtraPathSegment`] or [`ApiError::InvalidId`] for a
/// path that no other item method would accept either.
pub async fn item_preflight(Path(segment): Path<String>) -> Result<StatusCode, ApiError> {
    parse_item_id(&segment)?;
    Ok(StatusCode::OK)
}

/// `/api/employee/` with nothing after the slash.
///
/// The catch-all item route never matches an empty segment, so this path
/// needs its own route to answer 404 through the header middleware.
///
/// # Errors
///
/// Always returns [`ApiError::InvalidId`].
pub async fn empty_item_segment() -> Result<StatusCode, ApiError> {
    Err(ApiError::InvalidId(String::new()))
}

/// Employee routes, wrapped in the response header middleware.
///
/// Methods without a handler answer 405 on both paths.
pub fn routes() -> Router<AppState> {
    let router = Router::new()
        .route(
            "/employee",
            get(list_employees)
                .post(create_employee)
                .options(preflight),
        )
        .route("/employee/", any(empty_item_segment))
        .route(
            "/employee/{*id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee)
                .options(item_preflight),
        );
    with_response_headers(router)
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Parses the trailing path segment of an item route.
///
/// # Errors
///
/// Returns [`ApiError::ExtraPathSegment`] if more than one segment follows
/// the collection path, and [`ApiError::InvalidId`] if the segment is not
/// an integer.
fn parse_item_id(segment: &str) -> Result<EmployeeId, ApiError> {
    if segment.contains('/') {
        return Err(ApiError::ExtraPathSegment(segment.to_string()));
    }
    segment
        .parse()
        .map_err(|_| ApiError::InvalidId(segment.to_string()))
}

fn decode_employee(body: &[u8]) -> Result<Employee, ApiError> {
    serde_json::from_slice(body).map_err(ApiError::MalformedBody)
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(ApiError::Encode)?;
    Ok((status, body).into_response())
}

/// Success body for `POST /api/employee`.
fn created_body(id: i64) -> String {
    format!(r#"{{"id}}: {id}}}"#)
}
