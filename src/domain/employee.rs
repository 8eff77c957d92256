//! The employee record.
//!
//! [`Employee`] is the only entity the service manages. It doubles as the
//! JSON wire shape and the row shape of the `employee` table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Primary key of an [`Employee`] row. Supplied by the caller, never
/// generated by the store.
pub type EmployeeId = i64;

/// One row of the `employee` table.
///
/// Fields missing from a JSON payload decode to their zero value; no
/// format or emptiness checks are applied anywhere in the service.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow,
)]
#[serde(default)]
pub struct Employee {
    /// Primary key.
    pub id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name. Carried under the JSON key `last`.
    #[serde(rename = "last")]
    pub last_name: String,
    /// Age in years.
    pub age: i32,
    /// Contact email, stored as given.
    pub email: String,
    /// Contact phone number, stored as given.
    pub phone: String,
    /// External company identifier.
    pub cid: String,
    /// Job title.
    pub position: String,
}
