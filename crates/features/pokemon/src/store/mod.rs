//! Document store port and its adapters.

pub mod memory;
pub mod object_id;
#[cfg(feature = "surreal")]
pub mod surreal;

use crate::error::StoreError;
use crate::model::{NewPokemon, Pokemon, UpdatePokemon};
use async_trait::async_trait;
use pokedex_domain::pagination::Pagination;
use std::fmt::Debug;

pub use memory::MemoryStore;
#[cfg(feature = "surreal")]
pub use surreal::SurrealStore;

/// Equality filter for single-document lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    No(i64),
    Name(String),
}

/// Persistence operations required by the pokemon service.
///
/// Collections are insertion ordered. Names are unique; writes that would break
/// that report [`StoreError::DuplicateKey`]. Update and delete by an unknown
/// identifier are not errors.
#[async_trait]
pub trait PokemonStore: Debug + Send + Sync {
    /// First document matching `filter`, in insertion order.
    async fn find_one(&self, filter: &Filter) -> Result<Option<Pokemon>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Pokemon>, StoreError>;

    /// Window over the collection in insertion order.
    async fn find(&self, page: Pagination) -> Result<Vec<Pokemon>, StoreError>;

    /// Inserts a document and returns it with its new identifier.
    async fn create(&self, pokemon: NewPokemon) -> Result<Pokemon, StoreError>;

    /// Applies the present fields of `patch` to the document with `id`.
    async fn update_one(&self, id: &str, patch: &UpdatePokemon) -> Result<(), StoreError>;

    /// Returns the number of documents removed (0 or 1).
    async fn delete_one(&self, id: &str) -> Result<u64, StoreError>;

    /// Empties the collection, returning the number of documents removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// Inserts in order and stops at the first failure; earlier documents stay.
    async fn insert_many(&self, pokemon: Vec<NewPokemon>) -> Result<usize, StoreError> {
        let mut inserted = 0;
        for document in pokemon {
            self.create(document).await?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// Whether `term` has the shape of an identifier this store issues.
    fn is_valid_id(&self, term: &str) -> bool {
        object_id::is_valid(term)
    }
}
