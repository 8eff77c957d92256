//! # employee-api
//!
//! JSON REST API exposing CRUD operations over a single `employee` table.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── Response headers (api/middleware)
//!     ├── REST Handlers (api/handlers)
//!     │
//!     ├── EmployeeStore (persistence/)
//!     │
//!     └── MySQL `employee` table
//! ```
//!
//! [`app::build_app`] assembles the full router around an injected store;
//! the binary only loads configuration, picks the store and serves.

pub mod api;
pub mod app;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
