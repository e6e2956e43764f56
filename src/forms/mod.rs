//! Request payloads: `validator`-checked forms and their typed payloads.

pub mod categories;
pub mod places;
pub mod recommendations;
