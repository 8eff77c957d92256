//! Domain layer: the employee record and its identifier.

pub mod employee;

pub use employee::{Employee, EmployeeId};
