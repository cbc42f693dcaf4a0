//! Domain types and validation rules shared by the pet store crates.
//!
//! Nothing in here performs I/O: the `db` crate persists these concepts and
//! the `api` crate exposes them over HTTP.

pub mod error;
pub mod order;
pub mod pet;
pub mod types;
pub mod user;
