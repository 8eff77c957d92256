//! MySQL implementation of the employee store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

use super::{EmployeeStore, StoreError, bounded};
use crate::config::ServiceConfig;
use crate::domain::{Employee, EmployeeId};

const SELECT_ALL: &str =
    "SELECT id, first_name, last_name, age, email, phone, cid, position FROM employee";

const SELECT_ONE: &str = "SELECT id, first_name, last_name, age, email, phone, cid, position \
                          FROM employee WHERE id = ?";

const INSERT: &str = "INSERT INTO employee (id, first_name, last_name, age, email, phone, cid, position) \
                      VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

const UPDATE: &str = "UPDATE employee SET id = ?, first_name = ?, last_name = ?, age = ?, \
                      email = ?, phone = ?, cid = ?, position = ? WHERE id = ?";

const DELETE: &str = "DELETE FROM employee WHERE id = ?";

/// MySQL-backed store using `sqlx::MySqlPool`.
///
/// The pool is the only shared mutable resource in the service; it handles
/// concurrent checkout up to its configured maximum.
#[derive(Debug, Clone)]
pub struct MySqlEmployeeStore {
    pool: MySqlPool,
    op_timeout: Duration,
}

impl MySqlEmployeeStore {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: MySqlPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    /// Builds a pool from `config` without opening any connection.
    ///
    /// Connections are established on first use, so an unreachable server
    /// surfaces as a per-request error rather than a startup failure.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the database URL is malformed.
    pub fn connect_lazy(config: &ServiceConfig) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.database_max_connections)
            .max_lifetime(Duration::from_secs(config.database_max_lifetime_secs))
            .idle_timeout(None)
            .acquire_timeout(config.store_op_timeout)
            .connect_lazy(&config.database_url)?;

        Ok(Self::new(pool, config.store_op_timeout))
    }
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = bounded(self.op_timeout, async {
            sqlx::query_as::<_, Employee>(SELECT_ALL)
                .fetch_all(&self.pool)
                .await
                .map_err(StoreError::from)
        })
        .await?;

        tracing::debug!(count = rows.len(), "listed employees");
        Ok(rows)
    }

    async fn insert_employee(&self, employee: &Employee) -> Result<i64, StoreError> {
        let result = bounded(self.op_timeout, async {
            sqlx::query(INSERT)
                .bind(employee.id)
                .bind(&employee.first_name)
                .bind(&employee.last_name)
                .bind(employee.age)
                .bind(&employee.email)
                .bind(&employee.phone)
                .bind(&employee.cid)
                .bind(&employee.position)
                .execute(&self.pool)
                .await
                .map_err(StoreError::from)
        })
        .await?;

        let inserted_id = reported_id(result.last_insert_id());
        tracing::info!(id = employee.id, inserted_id, "employee inserted");
        Ok(inserted_id)
    }

    async fn get_employee(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        let row = bounded(self.op_timeout, async {
            sqlx::query_as::<_, Employee>(SELECT_ONE)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::from)
        })
        .await?;

        tracing::debug!(id, found = row.is_some(), "fetched employee");
        Ok(row)
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        employee: &Employee,
    ) -> Result<i64, StoreError> {
        let result = bounded(self.op_timeout, async {
            sqlx::query(UPDATE)
                .bind(employee.id)
                .bind(&employee.first_name)
                .bind(&employee.last_name)
                .bind(employee.age)
                .bind(&employee.email)
                .bind(&employee.phone)
                .bind(&employee.cid)
                .bind(&employee.position)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(StoreError::from)
        })
        .await?;

        tracing::info!(
            id,
            new_id = employee.id,
            rows_affected = result.rows_affected(),
            "employee updated"
        );
        Ok(reported_id(result.last_insert_id()))
    }

    async fn remove_employee(&self, id: EmployeeId) -> Result<(), StoreError> {
        let result = bounded(self.op_timeout, async {
            sqlx::query(DELETE)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(StoreError::from)
        })
        .await?;

        tracing::info!(id, rows_affected = result.rows_affected(), "employee removed");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Converts the backend's unsigned last-insert-id into the signed id space.
///
/// Values above `i64::MAX` cannot come from a signed `id` column; they are
/// clamped and logged.
fn reported_id(raw: u64) -> i64 {
    i64::try_from(raw).unwrap_or_else(|_| {
        tracing::warn!(raw, "last-insert-id out of range, clamping to i64::MAX");
        i64::MAX
    })
}
