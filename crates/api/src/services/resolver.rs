//! Reference resolution for categories and tags.
//!
//! Caller-supplied categories and tags are matched by exact name against the
//! stored rows. A match is reused as-is; anything unmatched passes through as
//! [`Reference::New`] and is created when the pet is persisted. Absence is a
//! valid outcome, never an error. Nothing is written here.

use petstore_core::pet::Reference;
use petstore_db::models::category::Category;
use petstore_db::models::tag::Tag;

use crate::services::pet_store::PetStore;

/// Resolve a category name to the stored row, if one exists.
pub async fn resolve_category<S>(store: &S, name: &str) -> Result<Reference<Category>, sqlx::Error>
where
    S: PetStore + ?Sized,
{
    Ok(match store.find_category_by_name(name).await? {
        Some(category) => Reference::Existing(category),
        None => Reference::New(name.to_string()),
    })
}

/// Resolve each tag name independently. Output order matches `names`.
pub async fn resolve_tags<S>(store: &S, names: &[String]) -> Result<Vec<Reference<Tag>>, sqlx::Error>
where
    S: PetStore + ?Sized,
{
    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        resolved.push(match store.find_tag_by_name(name).await? {
            Some(tag) => Reference::Existing(tag),
            None => Reference::New(name.clone()),
        });
    }
    Ok(resolved)
}
