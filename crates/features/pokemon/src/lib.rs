//! # Pokemon
//!
//! The pokemon resource slice. A [`PokemonService`] sits on top of an injected
//! [`PokemonStore`](store::PokemonStore) and provides tiered resolution of a
//! free-form term (pokedex number, then store id, then name), paginated
//! listing, validated create and partial update, delete by id, and a reseed
//! from the bundled first-generation dataset.
//!
//! Store failures pass through [`handle_store_error`] exactly once, which turns
//! uniqueness violations into [`PokemonError::DuplicateKey`] and everything else
//! into [`PokemonError::Internal`].

#[cfg(feature = "server")]
pub mod api;
mod error;
pub mod model;
pub mod resolver;
pub mod seed;
mod service;
pub mod store;

pub use error::{KeyValue, PokemonError, StoreError, StoreErrorExt, handle_store_error};
pub use model::{CreatePokemon, NewPokemon, Pokemon, UpdatePokemon, normalize_name};
pub use service::PokemonService;

use pokedex_kernel::prelude::{FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;

/// Slice state registered in the application state.
#[derive(Debug, Clone)]
pub struct PokemonSlice {
    service: PokemonService,
}

impl PokemonSlice {
    #[must_use]
    pub const fn new(service: PokemonService) -> Self {
        Self { service }
    }

    #[must_use]
    pub const fn service(&self) -> &PokemonService {
        &self.service
    }
}

impl Deref for PokemonSlice {
    type Target = PokemonService;

    fn deref(&self) -> &Self::Target {
        &self.service
    }
}

impl FeatureSlice for PokemonSlice {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registers the slice over an arbitrary store.
pub fn init_with_store(store: Arc<dyn store::PokemonStore>) -> InitializedSlice {
    InitializedSlice::new("pokemon", PokemonSlice::new(PokemonService::new(store)))
}

/// Initialize the pokemon feature on top of `SurrealDB`.
///
/// # Errors
/// Returns an error if the table or its unique index cannot be defined.
#[cfg(feature = "surreal")]
pub async fn init(
    database: &pokedex_database::Database,
) -> Result<InitializedSlice, PokemonError> {
    let store = store::SurrealStore::init(database.clone()).await.map_err(handle_store_error)?;
    tracing::info!("Pokemon slice initialized");
    Ok(init_with_store(Arc::new(store)))
}
