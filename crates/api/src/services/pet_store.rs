//! Storage capability consumed by the pet service.
//!
//! [`PgPetStore`] forwards to the repositories in `petstore_db`. Unit tests
//! use the in-memory store in [`memory`].

use async_trait::async_trait;
use sqlx::PgPool;
use petstore_core::pet::PetStatus;
use petstore_core::types::DbId;
use petstore_db::models::category::Category;
use petstore_db::models::pet::{NewPet, PetAggregate, PetReplacement};
use petstore_db::models::tag::Tag;
use petstore_db::repositories::{CategoryRepo, PetRepo, TagRepo};

/// Persistence operations the pet aggregate needs.
///
/// Writes that return `bool` report whether the pet existed.
#[async_trait]
pub trait PetStore: Send + Sync {
    async fn find_pet(&self, id: DbId) -> Result<Option<PetAggregate>, sqlx::Error>;

    /// Existence probe: id of the pet currently holding `name`.
    async fn find_pet_id_by_name(&self, name: &str) -> Result<Option<DbId>, sqlx::Error>;

    async fn find_category_by_id(&self, id: DbId) -> Result<Option<Category>, sqlx::Error>;

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, sqlx::Error>;

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, sqlx::Error>;

    async fn list_by_status(&self, statuses: &[PetStatus])
        -> Result<Vec<PetAggregate>, sqlx::Error>;

    /// Pets carrying every one of `tag_names`.
    async fn list_by_tags(&self, tag_names: &[String]) -> Result<Vec<PetAggregate>, sqlx::Error>;

    /// Persist a pet with its associations in one transaction.
    async fn create_pet(&self, input: &NewPet) -> Result<DbId, sqlx::Error>;

    async fn update_pet_fields(
        &self,
        id: DbId,
        name: &str,
        status: PetStatus,
    ) -> Result<bool, sqlx::Error>;

    /// Transactional replace; empty collections leave stored ones as they are.
    async fn replace_pet(&self, id: DbId, input: &PetReplacement) -> Result<bool, sqlx::Error>;

    async fn delete_pet(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// PostgreSQL-backed [`PetStore`].
#[derive(Clone)]
pub struct PgPetStore {
    pool: PgPool,
}

impl PgPetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetStore for PgPetStore {
    async fn find_pet(&self, id: DbId) -> Result<Option<PetAggregate>, sqlx::Error> {
        PetRepo::find_aggregate(&self.pool, id).await
    }

    async fn find_pet_id_by_name(&self, name: &str) -> Result<Option<DbId>, sqlx::Error> {
        PetRepo::find_id_by_name(&self.pool, name).await
    }

    async fn find_category_by_id(&self, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        CategoryRepo::find_by_id(&self.pool, id).await
    }

    async fn find_category_by_name(&self, name: &str) -> Result<Option<Category>, sqlx::Error> {
        CategoryRepo::find_by_name(&self.pool, name).await
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, sqlx::Error> {
        TagRepo::find_by_name(&self.pool, name).await
    }

    async fn list_by_status(
        &self,
        statuses: &[PetStatus],
    ) -> Result<Vec<PetAggregate>, sqlx::Error> {
        PetRepo::list_by_status(&self.pool, statuses).await
    }

    async fn list_by_tags(&self, tag_names: &[String]) -> Result<Vec<PetAggregate>, sqlx::Error> {
        PetRepo::list_by_tags(&self.pool, tag_names).await
    }

    async fn create_pet(&self, input: &NewPet) -> Result<DbId, sqlx::Error> {
        PetRepo::create(&self.pool, input).await
    }

    async fn update_pet_fields(
        &self,
        id: DbId,
        name: &str,
        status: PetStatus,
    ) -> Result<bool, sqlx::Error> {
        Ok(PetRepo::update_fields(&self.pool, id, name, status)
            .await?
            .is_some())
    }

    async fn replace_pet(&self, id: DbId, input: &PetReplacement) -> Result<bool, sqlx::Error> {
        PetRepo::replace(&self.pool, id, input).await
    }

    async fn delete_pet(&self, id: DbId) -> Result<bool, sqlx::Error> {
        PetRepo::delete(&self.pool, id).await
    }
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory [`PetStore`] mirroring the repository semantics closely
    //! enough for service-level tests.

    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use petstore_core::pet::Reference;

    use super::*;

    #[derive(Default)]
    struct Data {
        next_id: DbId,
        pets: BTreeMap<DbId, PetAggregate>,
        categories: Vec<Category>,
        tags: Vec<Tag>,
        /// Number of write calls that reached the store.
        writes: usize,
    }

    impl Data {
        fn next_id(&mut self) -> DbId {
            self.next_id += 1;
            self.next_id
        }

        fn category(&mut self, reference: &Reference<Category>) -> Category {
            match reference {
                Reference::Existing(c) => c.clone(),
                Reference::New(name) => {
                    if let Some(c) = self.categories.iter().find(|c| &c.name == name) {
                        return c.clone();
                    }
                    let c = Category {
                        id: self.next_id(),
                        name: name.clone(),
                    };
                    self.categories.push(c.clone());
                    c
                }
            }
        }

        fn tags(&mut self, references: &[Reference<Tag>]) -> Vec<Tag> {
            let mut out: Vec<Tag> = Vec::new();
            for reference in references {
                let tag = match reference {
                    Reference::Existing(t) => t.clone(),
                    Reference::New(name) => {
                        match self.tags.iter().find(|t| &t.name == name) {
                            Some(t) => t.clone(),
                            None => {
                                let t = Tag {
                                    id: self.next_id(),
                                    name: name.clone(),
                                };
                                self.tags.push(t.clone());
                                t
                            }
                        }
                    }
                };
                if !out.contains(&tag) {
                    out.push(tag);
                }
            }
            out
        }
    }

    #[derive(Default)]
    pub struct MemoryPetStore {
        data: Mutex<Data>,
    }

    impl MemoryPetStore {
        pub fn with_category(self, name: &str) -> Self {
            {
                let mut data = self.data.lock().unwrap();
                let id = data.next_id();
                data.categories.push(Category {
                    id,
                    name: name.to_string(),
                });
            }
            self
        }

        pub fn with_tag(self, name: &str) -> Self {
            {
                let mut data = self.data.lock().unwrap();
                let id = data.next_id();
                data.tags.push(Tag {
                    id,
                    name: name.to_string(),
                });
            }
            self
        }

        pub fn writes(&self) -> usize {
            self.data.lock().unwrap().writes
        }

        pub fn tag_count(&self) -> usize {
            self.data.lock().unwrap().tags.len()
        }
    }

    #[async_trait]
    impl PetStore for MemoryPetStore {
        async fn find_pet(&self, id: DbId) -> Result<Option<PetAggregate>, sqlx::Error> {
            Ok(self.data.lock().unwrap().pets.get(&id).cloned())
        }

        async fn find_pet_id_by_name(&self, name: &str) -> Result<Option<DbId>, sqlx::Error> {
            let data = self.data.lock().unwrap();
            Ok(data.pets.values().find(|p| p.name == name).map(|p| p.id))
        }

        async fn find_category_by_id(&self, id: DbId) -> Result<Option<Category>, sqlx::Error> {
            let data = self.data.lock().unwrap();
            Ok(data.categories.iter().find(|c| c.id == id).cloned())
        }

        async fn find_category_by_name(
            &self,
            name: &str,
        ) -> Result<Option<Category>, sqlx::Error> {
            let data = self.data.lock().unwrap();
            Ok(data.categories.iter().find(|c| c.name == name).cloned())
        }

        async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, sqlx::Error> {
            let data = self.data.lock().unwrap();
            Ok(data.tags.iter().find(|t| t.name == name).cloned())
        }

        async fn list_by_status(
            &self,
            statuses: &[PetStatus],
        ) -> Result<Vec<PetAggregate>, sqlx::Error> {
            let data = self.data.lock().unwrap();
            Ok(statuses
                .iter()
                .flat_map(|s| data.pets.values().filter(move |p| p.status == s.as_str()))
                .cloned()
                .collect())
        }

        async fn list_by_tags(
            &self,
            tag_names: &[String],
        ) -> Result<Vec<PetAggregate>, sqlx::Error> {
            let data = self.data.lock().unwrap();
            Ok(data
                .pets
                .values()
                .filter(|p| tag_names.iter().all(|n| p.tags.iter().any(|t| &t.name == n)))
                .cloned()
                .collect())
        }

        async fn create_pet(&self, input: &NewPet) -> Result<DbId, sqlx::Error> {
            let mut data = self.data.lock().unwrap();
            data.writes += 1;
            let category = input.category.as_ref().map(|c| data.category(c));
            let tags = data.tags(&input.tags);
            let id = data.next_id();
            data.pets.insert(
                id,
                PetAggregate {
                    id,
                    name: input.name.clone(),
                    status: input.status.as_str().to_string(),
                    category,
                    tags,
                    photo_urls: input.photo_urls.clone(),
                },
            );
            Ok(id)
        }

        async fn update_pet_fields(
            &self,
            id: DbId,
            name: &str,
            status: PetStatus,
        ) -> Result<bool, sqlx::Error> {
            let mut data = self.data.lock().unwrap();
            data.writes += 1;
            let Some(pet) = data.pets.get_mut(&id) else {
                return Ok(false);
            };
            pet.name = name.to_string();
            pet.status = status.as_str().to_string();
            Ok(true)
        }

        async fn replace_pet(
            &self,
            id: DbId,
            input: &PetReplacement,
        ) -> Result<bool, sqlx::Error> {
            let mut data = self.data.lock().unwrap();
            data.writes += 1;
            if !data.pets.contains_key(&id) {
                return Ok(false);
            }
            let tags = (!input.tags.is_empty()).then(|| data.tags(&input.tags));
            let category = match input.category_id {
                Some(cid) => data.categories.iter().find(|c| c.id == cid).cloned(),
                None => None,
            };
            let Some(pet) = data.pets.get_mut(&id) else {
                return Ok(false);
            };
            if !input.photo_urls.is_empty() {
                pet.photo_urls = input.photo_urls.clone();
            }
            if let Some(tags) = tags {
                pet.tags = tags;
            }
            if category.is_some() {
                pet.category = category;
            }
            pet.name = input.name.clone();
            pet.status = input.status.as_str().to_string();
            Ok(true)
        }

        async fn delete_pet(&self, id: DbId) -> Result<bool, sqlx::Error> {
            let mut data = self.data.lock().unwrap();
            data.writes += 1;
            Ok(data.pets.remove(&id).is_some())
        }
    }
}
