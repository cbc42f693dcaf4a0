//! Domain services sitting between handlers and repositories.
//!
//! - [`pet`] -- the pet aggregate service (create, replace, rename, delete, photos).
//! - [`resolver`] -- name-based reuse of categories and tags.
//! - [`pet_store`] -- the storage capability the pet service runs against.

pub mod pet;
pub mod pet_store;
pub mod resolver;

use crate::state::AppState;

/// Pet service bound to the application's database pool.
pub fn pet_service(state: &AppState) -> pet::PetService<pet_store::PgPetStore> {
    pet::PetService::new(pet_store::PgPetStore::new(state.pool.clone()))
}
