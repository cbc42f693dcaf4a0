//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` entity structs matching the database rows
//! - `Deserialize` wire payloads as clients send them (camelCase)
//! - the typed inputs handed to the repositories

pub mod category;
pub mod order;
pub mod pet;
pub mod photo_url;
pub mod tag;
pub mod user;
