//! Repository modules, one per table family.
//!
//! Every repository is a zero-sized struct with `async fn`s that take a
//! `&PgPool` (or a transaction for steps that must share one).

pub mod category_repo;
pub mod order_repo;
pub mod pet_repo;
pub mod photo_url_repo;
pub mod tag_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use order_repo::OrderRepo;
pub use pet_repo::PetRepo;
pub use photo_url_repo::PhotoUrlRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
