use async_trait::async_trait;
use parking_lot::Mutex;
use pokedex_domain::pagination::Pagination;
use pokedex_pokemon::store::{Filter, MemoryStore, PokemonStore};
use pokedex_pokemon::{
    CreatePokemon, NewPokemon, Pokemon, PokemonError, PokemonService, StoreError, UpdatePokemon,
};
use std::sync::Arc;

/// Memory store that records every read it serves.
#[derive(Debug, Default)]
struct RecordingStore {
    inner: MemoryStore,
    reads: Mutex<Vec<String>>,
}

impl RecordingStore {
    fn reads(&self) -> Vec<String> {
        self.reads.lock().clone()
    }

    fn clear(&self) {
        self.reads.lock().clear();
    }
}

#[async_trait]
impl PokemonStore for RecordingStore {
    async fn find_one(&self, filter: &Filter) -> Result<Option<Pokemon>, StoreError> {
        self.reads.lock().push(format!("{filter:?}"));
        self.inner.find_one(filter).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Pokemon>, StoreError> {
        self.reads.lock().push(format!("Id({id})"));
        self.inner.find_by_id(id).await
    }

    async fn find(&self, page: Pagination) -> Result<Vec<Pokemon>, StoreError> {
        self.inner.find(page).await
    }

    async fn create(&self, pokemon: NewPokemon) -> Result<Pokemon, StoreError> {
        self.inner.create(pokemon).await
    }

    async fn update_one(&self, id: &str, patch: &UpdatePokemon) -> Result<(), StoreError> {
        self.inner.update_one(id, patch).await
    }

    async fn delete_one(&self, id: &str) -> Result<u64, StoreError> {
        self.inner.delete_one(id).await
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        self.inner.delete_all().await
    }
}

fn setup() -> (Arc<RecordingStore>, PokemonService) {
    let store = Arc::new(RecordingStore::default());
    let service = PokemonService::new(store.clone());
    (store, service)
}

fn payload(no: i64, name: &str) -> CreatePokemon {
    CreatePokemon { no, name: name.to_owned(), types: vec![] }
}

#[tokio::test]
async fn numeric_term_resolves_by_no_only() {
    let (store, service) = setup();
    let pikachu = service.create(payload(1, "pikachu")).await.unwrap();
    store.clear();

    assert_eq!(service.resolve("1").await.unwrap(), pikachu);
    assert_eq!(store.reads(), ["No(1)"]);
}

#[tokio::test]
async fn radix_literal_resolves_by_no() {
    let (store, service) = setup();
    let pikachu = service.create(payload(25, "pikachu")).await.unwrap();
    store.clear();

    assert_eq!(service.resolve("0x19").await.unwrap(), pikachu);
    assert_eq!(service.resolve("0b11001").await.unwrap(), pikachu);
    assert_eq!(store.reads(), ["No(25)", "No(25)"]);
}

#[tokio::test]
async fn name_is_case_and_whitespace_insensitive() {
    let (_, service) = setup();
    let pikachu = service.create(payload(1, "pikachu")).await.unwrap();

    assert_eq!(service.resolve("PIKACHU ").await.unwrap(), pikachu);
    assert_eq!(service.resolve("  PiKaChU").await.unwrap(), pikachu);
}

#[tokio::test]
async fn absent_id_falls_through_to_not_found() {
    let (store, service) = setup();
    service.create(payload(1, "pikachu")).await.unwrap();
    store.clear();

    let err = service.resolve("000000000000000000000000").await.unwrap_err();
    let PokemonError::NotFound { term, .. } = &err else { panic!("expected NotFound") };
    assert_eq!(term, "000000000000000000000000");
    assert_eq!(
        err.to_string(),
        r#"Pokemon with id, name or no "000000000000000000000000" not found"#
    );
    // All-zero is numeric: the number tier runs before the id tier.
    assert_eq!(
        store.reads(),
        ["No(0)", "Id(000000000000000000000000)", "Name(\"000000000000000000000000\")"]
    );
}

#[tokio::test]
async fn valid_id_without_matching_no_resolves_by_id() {
    let (store, service) = setup();
    let bulbasaur = service.create(payload(1, "bulbasaur")).await.unwrap();
    store.clear();

    assert_eq!(service.resolve(&bulbasaur.id).await.unwrap(), bulbasaur);
    assert_eq!(store.reads(), [format!("Id({})", bulbasaur.id)]);
}

#[tokio::test]
async fn number_miss_falls_back_to_name() {
    let (_, service) = setup();
    let odd = service.create(payload(7, "42")).await.unwrap();

    assert_eq!(service.resolve("42").await.unwrap(), odd);
}

#[tokio::test]
async fn duplicate_names_differing_by_case_are_rejected() {
    let (_, service) = setup();
    let first = service.create(payload(1, "Pikachu")).await.unwrap();
    assert_eq!(first.name, "pikachu");

    let err = service.create(payload(2, "pikachu")).await.unwrap_err();
    let PokemonError::DuplicateKey { fields } = &err else {
        panic!("expected DuplicateKey, got {err:?}")
    };
    assert_eq!(fields.len(), 1);
    assert_eq!(fields["name"], "pikachu");

    let err = service.create(payload(3, " PIKACHU ")).await.unwrap_err();
    assert!(matches!(err, PokemonError::DuplicateKey { .. }));
}

#[tokio::test]
async fn update_returns_merge_without_rereading() {
    let (store, service) = setup();
    let pikachu = service.create(payload(1, "pikachu")).await.unwrap();
    store.clear();

    let patch = UpdatePokemon { name: Some("Raichu".to_owned()), ..Default::default() };
    let updated = service.update("1", patch).await.unwrap();

    assert_eq!(updated.name, "raichu");
    assert_eq!(updated.no, 1);
    assert_eq!(updated.id, pikachu.id);
    assert_eq!(store.reads(), ["No(1)"]);
    assert_eq!(service.resolve("raichu").await.unwrap(), updated);
}

#[tokio::test]
async fn empty_update_resolves_without_writing() {
    let (store, service) = setup();
    let pikachu = service.create(payload(25, "pikachu")).await.unwrap();

    let updated = service.update("pikachu", UpdatePokemon::default()).await.unwrap();
    assert_eq!(updated, pikachu);
    assert_eq!(store.inner.revision(&pikachu.id), Some(0));

    let patch = UpdatePokemon { no: Some(26), ..Default::default() };
    service.update("pikachu", patch).await.unwrap();
    assert_eq!(store.inner.revision(&pikachu.id), Some(1));
}

#[tokio::test]
async fn update_into_existing_name_is_a_duplicate() {
    let (_, service) = setup();
    service.create(payload(25, "pikachu")).await.unwrap();
    service.create(payload(26, "raichu")).await.unwrap();

    let patch = UpdatePokemon { name: Some("RAICHU".to_owned()), ..Default::default() };
    let err = service.update("pikachu", patch).await.unwrap_err();
    assert_eq!(err.to_string(), r#"Pokemon already exists in db {"name":"raichu"}"#);
}

#[tokio::test]
async fn update_validates_before_resolving() {
    let (store, service) = setup();
    service.create(payload(25, "pikachu")).await.unwrap();
    store.clear();

    let patch = UpdatePokemon { no: Some(0), ..Default::default() };
    let err = service.update("pikachu", patch).await.unwrap_err();
    assert!(matches!(err, PokemonError::Validation { .. }));
    assert!(store.reads().is_empty());
}

#[tokio::test]
async fn update_of_unknown_term_is_not_found() {
    let (_, service) = setup();
    let err = service.update("missingno", UpdatePokemon::default()).await.unwrap_err();
    assert!(matches!(err, PokemonError::NotFound { .. }));
}

#[tokio::test]
async fn remove_then_lookup_is_not_found() {
    let (_, service) = setup();
    let pikachu = service.create(payload(25, "pikachu")).await.unwrap();

    assert!(service.remove(&pikachu.id).await.unwrap());
    assert!(matches!(service.resolve(&pikachu.id).await, Err(PokemonError::NotFound { .. })));

    let err = service.remove(&pikachu.id).await.unwrap_err();
    assert_eq!(err.to_string(), format!(r#"Pokemon with id "{}" not found"#, pikachu.id));
}

#[tokio::test]
async fn list_pages_in_insertion_order() {
    let (_, service) = setup();
    for (no, name) in [(3, "venusaur"), (1, "bulbasaur"), (2, "ivysaur")] {
        service.create(payload(no, name)).await.unwrap();
    }

    let page = service.list(Pagination::new(2, 1)).await.unwrap();
    let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["bulbasaur", "ivysaur"]);
    assert!(service.list(Pagination::new(10, 3)).await.unwrap().is_empty());
}

#[tokio::test]
async fn seed_replaces_collection() {
    let (_, service) = setup();
    service.create(payload(999, "missingno")).await.unwrap();

    assert_eq!(service.seed().await.unwrap(), 151);
    assert!(matches!(service.resolve("missingno").await, Err(PokemonError::NotFound { .. })));
    assert_eq!(service.resolve("25").await.unwrap().name, "pikachu");

    let all = service.list(Pagination::new(500, 0)).await.unwrap();
    assert_eq!(all.len(), 151);
    assert_eq!(all[0].name, "bulbasaur");

    // Seeding twice is idempotent.
    assert_eq!(service.seed().await.unwrap(), 151);
}
