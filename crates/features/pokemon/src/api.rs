//! HTTP surface of the pokemon slice, mounted under `/api`.

use crate::error::PokemonError;
use crate::model::{CreatePokemon, Pokemon, UpdatePokemon};
use crate::service::PokemonService;
use crate::PokemonSlice;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pokedex_domain::constants::POKEMON_TAG;
use pokedex_kernel::prelude::{ApiState, ErrorBody, PaginationQuery};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Result of `GET /api/seed`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeedResponse {
    pub message: String,
    /// Number of inserted records.
    pub inserted: usize,
}

fn service(state: &ApiState) -> Result<&PokemonService, PokemonError> {
    Ok(state.try_get_slice::<PokemonSlice>()?.service())
}

#[utoipa::path(
    post,
    path = "/pokemon",
    request_body = CreatePokemon,
    responses(
        (status = CREATED, description = "Pokemon created", body = Pokemon),
        (status = BAD_REQUEST, description = "Invalid payload or duplicate name", body = ErrorBody),
    ),
    tag = POKEMON_TAG,
)]
pub(crate) async fn create_handler(
    State(state): State<ApiState>,
    payload: Result<Json<CreatePokemon>, JsonRejection>,
) -> Result<(StatusCode, Json<Pokemon>), PokemonError> {
    let Json(payload) = payload?;
    let created = service(&state)?.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/pokemon",
    params(PaginationQuery),
    responses(
        (status = OK, description = "Page of pokemon in insertion order", body = [Pokemon]),
        (status = BAD_REQUEST, description = "Invalid pagination", body = ErrorBody),
    ),
    tag = POKEMON_TAG,
)]
pub(crate) async fn list_handler(
    State(state): State<ApiState>,
    query: Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<Json<Vec<Pokemon>>, PokemonError> {
    let Query(query) = query?;
    let page = query.resolve(state.config.pagination.default_limit)?;
    Ok(Json(service(&state)?.list(page).await?))
}

#[utoipa::path(
    get,
    path = "/pokemon/{term}",
    params(("term" = String, Path, description = "Pokedex number, store id, or name")),
    responses(
        (status = OK, description = "Resolved pokemon", body = Pokemon),
        (status = NOT_FOUND, description = "No tier matched", body = ErrorBody),
    ),
    tag = POKEMON_TAG,
)]
pub(crate) async fn find_handler(
    State(state): State<ApiState>,
    Path(term): Path<String>,
) -> Result<Json<Pokemon>, PokemonError> {
    Ok(Json(service(&state)?.resolve(&term).await?))
}

#[utoipa::path(
    patch,
    path = "/pokemon/{term}",
    params(("term" = String, Path, description = "Pokedex number, store id, or name")),
    request_body = UpdatePokemon,
    responses(
        (status = OK, description = "Resolved record merged with the patch", body = Pokemon),
        (status = BAD_REQUEST, description = "Invalid payload or duplicate name", body = ErrorBody),
        (status = NOT_FOUND, description = "No tier matched", body = ErrorBody),
    ),
    tag = POKEMON_TAG,
)]
pub(crate) async fn update_handler(
    State(state): State<ApiState>,
    Path(term): Path<String>,
    payload: Result<Json<UpdatePokemon>, JsonRejection>,
) -> Result<Json<Pokemon>, PokemonError> {
    let Json(payload) = payload?;
    Ok(Json(service(&state)?.update(&term, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/pokemon/{term}",
    params(("term" = String, Path, description = "Store id (24 hex characters)")),
    responses(
        (status = OK, description = "Pokemon removed", body = bool),
        (status = BAD_REQUEST, description = "Malformed id", body = ErrorBody),
        (status = NOT_FOUND, description = "Nothing stored under this id", body = ErrorBody),
    ),
    tag = POKEMON_TAG,
)]
pub(crate) async fn remove_handler(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<bool>, PokemonError> {
    let service = service(&state)?;
    if !service.is_valid_id(&id) {
        return Err(PokemonError::validation(format!("\"{id}\" is not a valid id")));
    }
    let removed = service.remove(&id).await?;
    Ok(Json(removed))
}

#[utoipa::path(
    get,
    path = "/seed",
    responses(
        (status = OK, description = "Collection replaced with the bundled dataset", body = SeedResponse),
    ),
    tag = POKEMON_TAG,
)]
pub(crate) async fn seed_handler(
    State(state): State<ApiState>,
) -> Result<Json<SeedResponse>, PokemonError> {
    let inserted = service(&state)?.seed().await?;
    Ok(Json(SeedResponse { message: "Seed executed".to_owned(), inserted }))
}

/// Pokemon routes, relative to the `/api` prefix.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(create_handler, list_handler))
        .routes(routes!(find_handler, update_handler, remove_handler))
        .routes(routes!(seed_handler))
}
