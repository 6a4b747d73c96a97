//! Pokemon documents and the payloads that create or patch them.

use crate::error::PokemonError;
use serde::{Deserialize, Serialize};

/// A stored pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Pokemon {
    /// Store-assigned identifier (24 lowercase hex characters).
    pub id: String,
    /// National pokedex number.
    pub no: i64,
    /// Normalized (lowercase) unique name.
    pub name: String,
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
}

impl Pokemon {
    /// Applies an already normalized patch on top of this record.
    #[must_use]
    pub fn merged(mut self, patch: UpdatePokemon) -> Self {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(no) = patch.no {
            self.no = no;
        }
        if let Some(types) = patch.types {
            self.types = types;
        }
        self
    }
}

/// Request body for creating a pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct CreatePokemon {
    /// Positive integer.
    pub no: i64,
    /// Non-empty; stored trimmed and lowercased.
    pub name: String,
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
}

/// Request body for a partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(deny_unknown_fields)]
pub struct UpdatePokemon {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
}

/// Validated, normalized document ready to be written. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPokemon {
    pub no: i64,
    pub name: String,
    pub types: Vec<String>,
}

/// Canonical form of a pokemon name: surrounding whitespace removed, lowercased.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

fn validate_no(no: i64) -> Result<(), PokemonError> {
    if no < 1 {
        return Err(PokemonError::validation(format!("no must be a positive integer, got {no}")));
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), PokemonError> {
    if name.trim().is_empty() {
        return Err(PokemonError::validation("name must not be empty"));
    }
    Ok(())
}

impl CreatePokemon {
    /// Checks field constraints and produces the normalized document.
    pub fn into_new(self) -> Result<NewPokemon, PokemonError> {
        validate_no(self.no)?;
        validate_name(&self.name)?;
        Ok(NewPokemon { no: self.no, name: normalize_name(&self.name), types: self.types })
    }
}

impl UpdatePokemon {
    /// Checks the supplied fields and normalizes the name if present.
    pub fn normalized(self) -> Result<Self, PokemonError> {
        if let Some(no) = self.no {
            validate_no(no)?;
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        Ok(Self { name: self.name.as_deref().map(normalize_name), ..self })
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.no.is_none() && self.name.is_none() && self.types.is_none()
    }
}
