//! Names shared between the HTTP surface, the store, and the docs.

/// `OpenAPI` tag for operational endpoints.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the pokemon resource.
pub const POKEMON_TAG: &str = "Pokemon";

/// Document collection (table) holding pokemon records.
pub const POKEMON: &str = "pokemon";
/// Unique index enforcing one record per normalized name.
pub const POKEMON_NAME_INDEX: &str = "pokemon_name_unique";
