//! REST endpoint handlers organized by resource.

pub mod employee;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new().merge(employee::routes())
}
