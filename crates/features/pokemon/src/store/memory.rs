//! In-process store used by tests and ephemeral deployments.

use super::{Filter, PokemonStore, object_id};
use crate::error::StoreError;
use crate::model::{NewPokemon, Pokemon, UpdatePokemon};
use async_trait::async_trait;
use parking_lot::RwLock;
use pokedex_domain::pagination::Pagination;

#[derive(Debug)]
struct Document {
    pokemon: Pokemon,
    revision: u64,
}

/// Insertion-ordered vector guarded by a read-write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Document>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Update counter of the document with `id`, if present.
    #[must_use]
    pub fn revision(&self, id: &str) -> Option<u64> {
        self.documents.read().iter().find(|d| same_id(&d.pokemon.id, id)).map(|d| d.revision)
    }
}

fn same_id(stored: &str, requested: &str) -> bool {
    stored.eq_ignore_ascii_case(requested)
}

fn insert(documents: &mut Vec<Document>, pokemon: NewPokemon) -> Result<Pokemon, StoreError> {
    if documents.iter().any(|d| d.pokemon.name == pokemon.name) {
        return Err(StoreError::duplicate("name", pokemon.name));
    }
    let stored = Pokemon {
        id: object_id::generate(),
        no: pokemon.no,
        name: pokemon.name,
        types: pokemon.types,
    };
    documents.push(Document { pokemon: stored.clone(), revision: 0 });
    Ok(stored)
}

#[async_trait]
impl PokemonStore for MemoryStore {
    async fn find_one(&self, filter: &Filter) -> Result<Option<Pokemon>, StoreError> {
        let documents = self.documents.read();
        let found = documents.iter().map(|d| &d.pokemon).find(|p| match filter {
            Filter::No(no) => p.no == *no,
            Filter::Name(name) => &p.name == name,
        });
        Ok(found.cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Pokemon>, StoreError> {
        let documents = self.documents.read();
        Ok(documents.iter().find(|d| same_id(&d.pokemon.id, id)).map(|d| d.pokemon.clone()))
    }

    async fn find(&self, page: Pagination) -> Result<Vec<Pokemon>, StoreError> {
        let skip = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit).unwrap_or(usize::MAX);
        let documents = self.documents.read();
        Ok(documents.iter().skip(skip).take(take).map(|d| d.pokemon.clone()).collect())
    }

    async fn create(&self, pokemon: NewPokemon) -> Result<Pokemon, StoreError> {
        insert(&mut self.documents.write(), pokemon)
    }

    async fn update_one(&self, id: &str, patch: &UpdatePokemon) -> Result<(), StoreError> {
        let mut documents = self.documents.write();
        if let Some(name) = &patch.name
            && documents.iter().any(|d| &d.pokemon.name == name && !same_id(&d.pokemon.id, id))
        {
            return Err(StoreError::duplicate("name", name.clone()));
        }
        if let Some(document) = documents.iter_mut().find(|d| same_id(&d.pokemon.id, id)) {
            document.pokemon = document.pokemon.clone().merged(patch.clone());
            document.revision += 1;
        }
        Ok(())
    }

    async fn delete_one(&self, id: &str) -> Result<u64, StoreError> {
        let mut documents = self.documents.write();
        let before = documents.len();
        documents.retain(|d| !same_id(&d.pokemon.id, id));
        Ok((before - documents.len()) as u64)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut documents = self.documents.write();
        let removed = documents.len() as u64;
        documents.clear();
        Ok(removed)
    }

    async fn insert_many(&self, pokemon: Vec<NewPokemon>) -> Result<usize, StoreError> {
        let mut documents = self.documents.write();
        let mut inserted = 0;
        for document in pokemon {
            insert(&mut documents, document)?;
            inserted += 1;
        }
        Ok(inserted)
    }
}
