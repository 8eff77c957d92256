//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::persistence::EmployeeStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Built once by the bootstrap code, which also owns the store's
/// lifecycle. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record store for the `employee` table.
    pub store: Arc<dyn EmployeeStore>,
}

impl AppState {
    /// Wraps a store for injection into the router.
    #[must_use]
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }
}
