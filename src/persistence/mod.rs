//! Persistence layer: the employee record store.
//!
//! [`EmployeeStore`] is the seam between the HTTP handlers and the backing
//! table. [`mysql::MySqlEmployeeStore`] is the production implementation
//! over `sqlx::MySqlPool`; [`memory::InMemoryEmployeeStore`] keeps rows in
//! process and backs the test suite and `STORE=memory` runs.
//!
//! Every operation runs under its own fixed timeout and is abandoned with
//! [`StoreError::Timeout`] when it elapses. Nothing is retried.

pub mod memory;
pub mod mysql;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId};

pub use memory::InMemoryEmployeeStore;
pub use mysql::MySqlEmployeeStore;

/// Default per-operation timeout.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(3);

/// Failure of a single store operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The operation did not finish within its time budget.
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// The SQL backend rejected the statement or the connection failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row with this primary key already exists.
    #[error("duplicate primary key: {0}")]
    Conflict(EmployeeId),
}

/// Typed CRUD operations over the `employee` table.
///
/// Implementations own their connection resources; nothing outside the
/// store touches persistence directly.
#[async_trait]
pub trait EmployeeStore: Send + Sync + std::fmt::Debug {
    /// Returns every row in the backend's natural order. An empty table
    /// yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on timeout or backend failure.
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Inserts `employee` with its caller-supplied id and returns the
    /// backend-reported last-insert-id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on duplicate id, timeout or backend failure.
    async fn insert_employee(&self, employee: &Employee) -> Result<i64, StoreError>;

    /// Fetches the row with the given id. `Ok(None)` means no row matched.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on timeout or backend failure only.
    async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError>;

    /// Overwrites all eight columns, id included, of the row matching `id`.
    ///
    /// Matching zero rows is not an error. Returns the backend-reported
    /// last-insert-id, which is normally `0` for an update.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on key collision, timeout or backend failure.
    async fn update_employee(
        &self,
        id: EmployeeId,
        employee: &Employee,
    ) -> Result<i64, StoreError>;

    /// Deletes the row matching `id`. Deleting a missing row succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on timeout or backend failure.
    async fn remove_employee(&self, id: EmployeeId) -> Result<(), StoreError>;

    /// Releases backend resources. Called once during shutdown.
    async fn close(&self) {}
}

/// Runs `op` under `limit`, mapping expiry to [`StoreError::Timeout`].
///
/// The future is dropped on expiry, which abandons the in-flight statement
/// and returns its connection to the pool.
pub(crate) async fn bounded<T, F>(limit: Duration, op: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    tokio::time::timeout(limit, op)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounded_passes_through_fast_results() {
        let result = bounded(Duration::from_secs(1), async { Ok::<_, StoreError>(42) }).await;
        assert!(matches!(result, Ok(42)));
    }

    #[tokio::test]
    async fn bounded_times_out_slow_operations() {
        let limit = Duration::from_millis(10);
        let result = bounded(limit, async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, StoreError>(())
        })
        .await;
        let Err(StoreError::Timeout(elapsed)) = result else {
            panic!("expected timeout");
        };
        assert_eq!(elapsed, limit);
    }

    #[tokio::test]
    async fn bounded_keeps_inner_errors() {
        let result: Result<(), StoreError> =
            bounded(Duration::from_secs(1), async { Err(StoreError::Conflict(9)) }).await;
        assert!(matches!(result, Err(StoreError::Conflict(9))));
    }
}
