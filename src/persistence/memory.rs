//! In-process employee store.
//!
//! [`InMemoryEmployeeStore`] keeps rows in a `BTreeMap` behind a
//! [`tokio::sync::RwLock`], so listings come back in ascending id order.
//! It honours the same timeout contract as the SQL store and reports
//! duplicate keys the way a primary-key constraint would.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DEFAULT_OP_TIMEOUT, EmployeeStore, StoreError, bounded};
use crate::domain::{Employee, EmployeeId};

/// Employee rows held in memory.
///
/// Readers run concurrently; writers are serialized by the map lock.
#[derive(Debug)]
pub struct InMemoryEmployeeStore {
    rows: RwLock<BTreeMap<EmployeeId, Employee>>,
    op_timeout: Duration,
    latency: Duration,
}

impl InMemoryEmployeeStore {
    /// Creates an empty store with the default operation timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_OP_TIMEOUT)
    }

    /// Creates an empty store with a custom operation timeout.
    #[must_use]
    pub fn with_timeout(op_timeout: Duration) -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            op_timeout,
            latency: Duration::ZERO,
        }
    }

    /// Adds an artificial delay to every operation, simulating a slow
    /// backend.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Returns the number of stored rows.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Returns `true` if no rows are stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for InMemoryEmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        bounded(self.op_timeout, async {
            self.simulate_latency().await;
            let rows = self.rows.read().await;
            Ok::<_, StoreError>(rows.values().cloned().collect())
        })
        .await
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<i64, StoreError> {
        bounded(self.op_timeout, async {
            self.simulate_latency().await;
            let mut rows = self.rows.write().await;
            if rows.contains_key(&employee.id) {
                return Err(StoreError::Conflict(employee.id));
            }
            rows.insert(employee.id, employee.clone());
            tracing::info!(id = employee.id, "employee inserted");
            Ok(employee.id)
        })
        .await
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        bounded(self.op_timeout, async {
            self.simulate_latency().await;
            Ok::<_, StoreError>(self.rows.read().await.get(&id).cloned())
        })
        .await
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        employee: &Employee,
    ) -> Result<i64, StoreError> {
        bounded(self.op_timeout, async {
            self.simulate_latency().await;
            let mut rows = self.rows.write().await;
            if !rows.contains_key(&id) {
                tracing::info!(id, rows_affected = 0, "employee updated");
                return Ok(0);
            }
            if employee.id != id && rows.contains_key(&employee.id) {
                return Err(StoreError::Conflict(employee.id));
            }
            rows.remove(&id);
            rows.insert(employee.id, employee.clone());
            tracing::info!(id, new_id = employee.id, rows_affected = 1, "employee updated");
            Ok(0)
        })
        .await
    }

    async fn remove_employee(&self, id: EmployeeId) -> Result<(), StoreError> {
        bounded(self.op_timeout, async {
            self.simulate_latency().await;
            let removed = self.rows.write().await.remove(&id);
            tracing::info!(id, rows_affected = u8::from(removed.is_some()), "employee removed");
            Ok::<_, StoreError>(())
        })
        .await
    }
}
