//! `SurrealDB` adapter. Records live in the `pokemon` table keyed by their object id,
//! so a key-ordered scan yields insertion order.

use super::{Filter, PokemonStore, object_id};
use crate::error::{StoreError, StoreErrorExt};
use crate::model::{NewPokemon, Pokemon, UpdatePokemon};
use async_trait::async_trait;
use pokedex_database::Database;
use pokedex_domain::constants::{POKEMON, POKEMON_NAME_INDEX};
use pokedex_domain::pagination::Pagination;
use surrealdb::types::SurrealValue;
use tracing::{debug, instrument};

const PROJECTION: &str = "id.id() AS id, no, name, `type` AS types";

#[derive(Debug, SurrealValue)]
struct PokemonRow {
    id: String,
    no: i64,
    name: String,
    types: Vec<String>,
}

impl From<PokemonRow> for Pokemon {
    fn from(row: PokemonRow) -> Self {
        Self { id: row.id, no: row.no, name: row.name, types: row.types }
    }
}

#[derive(Debug, Clone)]
pub struct SurrealStore {
    db: Database,
}

impl SurrealStore {
    /// Wraps the connection and makes sure the table and its unique name index exist.
    #[instrument(skip_all, fields(ns = db.namespace(), db = db.database()))]
    pub async fn init(db: Database) -> Result<Self, StoreError> {
        let store = Self { db };
        store.ensure_schema().await?;
        Ok(store)
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        let query = format!(
            "DEFINE TABLE IF NOT EXISTS {POKEMON} SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS {POKEMON_NAME_INDEX} ON TABLE {POKEMON} FIELDS name UNIQUE;"
        );
        self.db
            .query(query)
            .await
            .context("Defining pokemon schema")?
            .check()
            .map_err(surrealdb::Error::from)
            .context("Defining pokemon schema")?;

        debug!(table = POKEMON, index = POKEMON_NAME_INDEX, "Pokemon schema ready");
        Ok(())
    }

    async fn count_removed(&self, target: &str) -> Result<u64, StoreError> {
        let removed = self
            .db
            .query(format!("(DELETE {target} RETURN BEFORE).len()"))
            .await
            .context("Deleting pokemon")?
            .take::<Option<i64>>(0)
            .context("Counting deleted pokemon")?;
        Ok(removed.and_then(|n| u64::try_from(n).ok()).unwrap_or_default())
    }
}

/// Lowercased record key, or `None` when `id` is not a store identifier.
fn record_key(id: &str) -> Option<String> {
    object_id::is_valid(id).then(|| id.to_ascii_lowercase())
}

/// Unique index violations become [`StoreError::DuplicateKey`] on the attempted name.
fn write_error(source: surrealdb::Error, name: Option<&str>, context: &'static str) -> StoreError {
    let message = source.to_string();
    match name {
        Some(name) if is_unique_violation(&message) => StoreError::duplicate("name", name),
        _ => StoreError::Backend { message: message.into(), context: Some(context.into()) },
    }
}

fn is_unique_violation(message: &str) -> bool {
    message.contains(POKEMON_NAME_INDEX) && message.contains("already contains")
}

#[async_trait]
impl PokemonStore for SurrealStore {
    async fn find_one(&self, filter: &Filter) -> Result<Option<Pokemon>, StoreError> {
        let base = format!("SELECT {PROJECTION} FROM {POKEMON}");
        let request = match filter {
            Filter::No(no) => self
                .db
                .query(format!("{base} WHERE no = $no ORDER BY id LIMIT 1"))
                .bind(("no", *no)),
            Filter::Name(name) => self
                .db
                .query(format!("{base} WHERE name = $name ORDER BY id LIMIT 1"))
                .bind(("name", name.clone())),
        };
        let rows = request
            .await
            .context("Querying pokemon")?
            .take::<Vec<PokemonRow>>(0)
            .context("Decoding pokemon rows")?;
        Ok(rows.into_iter().next().map(Pokemon::from))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Pokemon>, StoreError> {
        let Some(key) = record_key(id) else {
            return Ok(None);
        };
        let rows = self
            .db
            .query(format!("SELECT {PROJECTION} FROM {POKEMON}:⟨{key}⟩"))
            .await
            .context("Querying pokemon by id")?
            .take::<Vec<PokemonRow>>(0)
            .context("Decoding pokemon rows")?;
        Ok(rows.into_iter().next().map(Pokemon::from))
    }

    async fn find(&self, page: Pagination) -> Result<Vec<Pokemon>, StoreError> {
        let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);
        let start = i64::try_from(page.offset).unwrap_or(i64::MAX);
        let rows = self
            .db
            .query(format!(
                "SELECT {PROJECTION} FROM {POKEMON} ORDER BY id LIMIT $limit START $start"
            ))
            .bind(("limit", limit))
            .bind(("start", start))
            .await
            .context("Listing pokemon")?
            .take::<Vec<PokemonRow>>(0)
            .context("Decoding pokemon rows")?;
        Ok(rows.into_iter().map(Pokemon::from).collect())
    }

    async fn create(&self, pokemon: NewPokemon) -> Result<Pokemon, StoreError> {
        let id = object_id::generate();
        self.db
            .query(format!(
                "CREATE {POKEMON}:⟨{id}⟩ \
                SET no = $no, name = $name, `type` = $types, revision = 0 RETURN NONE"
            ))
            .bind(("no", pokemon.no))
            .bind(("name", pokemon.name.clone()))
            .bind(("types", pokemon.types.clone()))
            .await
            .map_err(|e| write_error(e, Some(&pokemon.name), "Creating pokemon"))?
            .check()
            .map_err(|e| write_error(e.into(), Some(&pokemon.name), "Creating pokemon"))?;

        Ok(Pokemon { id, no: pokemon.no, name: pokemon.name, types: pokemon.types })
    }

    async fn update_one(&self, id: &str, patch: &UpdatePokemon) -> Result<(), StoreError> {
        let Some(key) = record_key(id) else {
            return Ok(());
        };

        let mut assignments = Vec::with_capacity(4);
        if patch.no.is_some() {
            assignments.push("no = $no");
        }
        if patch.name.is_some() {
            assignments.push("name = $name");
        }
        if patch.types.is_some() {
            assignments.push("`type` = $types");
        }
        assignments.push("revision += 1");

        let mut request = self.db.query(format!(
            "UPDATE {POKEMON}:⟨{key}⟩ SET {} RETURN NONE",
            assignments.join(", ")
        ));
        if let Some(no) = patch.no {
            request = request.bind(("no", no));
        }
        if let Some(name) = &patch.name {
            request = request.bind(("name", name.clone()));
        }
        if let Some(types) = &patch.types {
            request = request.bind(("types", types.clone()));
        }

        let name = patch.name.as_deref();
        request
            .await
            .map_err(|e| write_error(e, name, "Updating pokemon"))?
            .check()
            .map_err(|e| write_error(e.into(), name, "Updating pokemon"))?;
        Ok(())
    }

    async fn delete_one(&self, id: &str) -> Result<u64, StoreError> {
        let Some(key) = record_key(id) else {
            return Ok(0);
        };
        self.count_removed(&format!("{POKEMON}:⟨{key}⟩")).await
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        self.count_removed(POKEMON).await
    }
}
