use crate::error::{PokemonError, handle_store_error};
use crate::model::{CreatePokemon, Pokemon, UpdatePokemon};
use crate::resolver::{Lookup, plan};
use crate::seed;
use crate::store::PokemonStore;
use pokedex_domain::pagination::Pagination;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Resource operations over an injected [`PokemonStore`].
#[derive(Debug, Clone)]
pub struct PokemonService {
    store: Arc<dyn PokemonStore>,
}

impl PokemonService {
    #[must_use]
    pub fn new(store: Arc<dyn PokemonStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &dyn PokemonStore {
        self.store.as_ref()
    }

    /// Whether `id` has the shape of a store identifier.
    #[must_use]
    pub fn is_valid_id(&self, id: &str) -> bool {
        self.store.is_valid_id(id)
    }

    /// Finds a pokemon by pokedex number, store id, or name, in that order.
    ///
    /// A tier that applies but finds nothing falls through to the next one.
    #[instrument(skip(self))]
    pub async fn resolve(&self, term: &str) -> Result<Pokemon, PokemonError> {
        for (strategy, lookup) in plan(term, self.store()) {
            if let Some(pokemon) = self.fetch(&lookup).await? {
                debug!(?strategy, id = %pokemon.id, "Resolved pokemon");
                return Ok(pokemon);
            }
        }
        Err(PokemonError::not_found(term))
    }

    async fn fetch(&self, lookup: &Lookup) -> Result<Option<Pokemon>, PokemonError> {
        let found = match lookup {
            Lookup::Filter(filter) => self.store.find_one(filter).await,
            Lookup::Id(id) => self.store.find_by_id(id).await,
        };
        found.map_err(handle_store_error)
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: Pagination) -> Result<Vec<Pokemon>, PokemonError> {
        self.store.find(page).await.map_err(handle_store_error)
    }

    #[instrument(skip(self))]
    pub async fn create(&self, payload: CreatePokemon) -> Result<Pokemon, PokemonError> {
        let pokemon = payload.into_new()?;
        let created = self.store.create(pokemon).await.map_err(handle_store_error)?;
        info!(id = %created.id, name = %created.name, no = created.no, "Pokemon created");
        Ok(created)
    }

    /// Resolves `term` and applies `payload` to the match.
    ///
    /// Returns the resolved record merged with the normalized payload. The store is
    /// not re-read, so concurrent writers between resolve and write are not reflected.
    /// A patch with no fields is not written.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        term: &str,
        payload: UpdatePokemon,
    ) -> Result<Pokemon, PokemonError> {
        let patch = payload.normalized()?;
        let current = self.resolve(term).await?;
        if patch.is_empty() {
            debug!(id = %current.id, "Empty patch, nothing to write");
            return Ok(current);
        }
        self.store.update_one(&current.id, &patch).await.map_err(handle_store_error)?;
        info!(id = %current.id, "Pokemon updated");
        Ok(current.merged(patch))
    }

    /// Deletes by store identifier only. Returns `true` once the record is gone.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<bool, PokemonError> {
        let removed = self.store.delete_one(id).await.map_err(handle_store_error)?;
        if removed == 0 {
            return Err(PokemonError::id_not_found(id));
        }
        info!(%id, "Pokemon removed");
        Ok(true)
    }

    /// Replaces the whole collection with the bundled dataset.
    #[instrument(skip(self))]
    pub async fn seed(&self) -> Result<usize, PokemonError> {
        let removed = self.store.delete_all().await.map_err(handle_store_error)?;
        let inserted =
            self.store.insert_many(seed::dataset()).await.map_err(handle_store_error)?;
        info!(removed, inserted, "Pokemon collection seeded");
        Ok(inserted)
    }
}
