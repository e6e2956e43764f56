//! HTTP handlers. Each is a thin wrapper: validate input, call the service,
//! map the outcome to a status code.

pub mod categories;
pub mod places;
pub mod recommendations;
