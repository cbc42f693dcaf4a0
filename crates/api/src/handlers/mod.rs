//! HTTP handlers, one module per resource.

pub mod pet;
pub mod store;
pub mod user;
