use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::{error, warn};

/// Conflicting `field -> value` pairs reported by a uniqueness violation.
pub type KeyValue = BTreeMap<String, Value>;

/// Failures surfaced to callers of the pokemon service.
#[derive(Debug, thiserror::Error)]
pub enum PokemonError {
    /// No record resolved through any tier, or a delete removed nothing.
    #[error("{message}")]
    NotFound { term: String, message: Cow<'static, str> },

    /// A write would violate a uniqueness constraint.
    #[error("Pokemon already exists in db {}", render_key_value(.fields))]
    DuplicateKey { fields: KeyValue },

    /// Rejected input.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Any other store failure, surfaced as-is.
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl PokemonError {
    /// Nothing matched `term` through the numeric, identifier, or name tiers.
    pub fn not_found(term: impl Into<String>) -> Self {
        let term = term.into();
        let message = format!("Pokemon with id, name or no \"{term}\" not found").into();
        Self::NotFound { term, message }
    }

    /// Nothing was stored under identifier `id`.
    pub fn id_not_found(id: impl Into<String>) -> Self {
        let term = id.into();
        let message = format!("Pokemon with id \"{term}\" not found").into();
        Self::NotFound { term, message }
    }

    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }
}

/// Failures reported by a [`PokemonStore`](crate::store::PokemonStore) adapter.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique index rejected the write.
    #[error("Duplicate key {}", render_key_value(.key_value))]
    DuplicateKey { key_value: KeyValue },

    /// Anything else the backend reported.
    #[error("Store backend error{}: {message}", format_context(.context))]
    Backend { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl StoreError {
    /// Duplicate on a single field.
    pub fn duplicate(field: &str, value: impl Into<Value>) -> Self {
        Self::DuplicateKey { key_value: KeyValue::from([(field.to_owned(), value.into())]) }
    }
}

/// Adds `.context(..)` to store results and raw backend results.
pub trait StoreErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, StoreError>;
}

impl<T> StoreErrorExt<T> for Result<T, StoreError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            if let StoreError::Backend { context: c, .. } = &mut e {
                *c = Some(context.into());
            }
            e
        })
    }
}

#[cfg(feature = "surreal")]
impl<T> StoreErrorExt<T> for Result<T, surrealdb::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, StoreError> {
        self.map_err(|e| StoreError::Backend {
            message: e.to_string().into(),
            context: Some(context.into()),
        })
    }
}

#[cfg(feature = "surreal")]
impl From<surrealdb::Error> for StoreError {
    fn from(e: surrealdb::Error) -> Self {
        Self::Backend { message: e.to_string().into(), context: None }
    }
}

/// Re-classifies a store failure into the caller-facing taxonomy.
///
/// Duplicate keys become [`PokemonError::DuplicateKey`]; everything else becomes
/// [`PokemonError::Internal`]. Every write path goes through here exactly once.
pub fn handle_store_error(err: StoreError) -> PokemonError {
    match err {
        StoreError::DuplicateKey { key_value } => {
            warn!(fields = %render_key_value(&key_value), "Rejected duplicate pokemon");
            PokemonError::DuplicateKey { fields: key_value }
        },
        StoreError::Backend { message, context } => {
            error!(%message, context = context.as_deref(), "Pokemon store failure");
            PokemonError::Internal { message, context }
        },
    }
}

#[cfg(feature = "server")]
mod http {
    use super::PokemonError;
    use axum::extract::rejection::{JsonRejection, QueryRejection};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use pokedex_kernel::prelude::{ApiStateError, PaginationError, error_response};
    use tracing::error;

    impl From<JsonRejection> for PokemonError {
        fn from(rejection: JsonRejection) -> Self {
            Self::Validation { message: rejection.body_text().into(), context: Some("body".into()) }
        }
    }

    impl From<QueryRejection> for PokemonError {
        fn from(rejection: QueryRejection) -> Self {
            Self::Validation {
                message: rejection.body_text().into(),
                context: Some("query".into()),
            }
        }
    }

    impl From<PaginationError> for PokemonError {
        fn from(e: PaginationError) -> Self {
            Self::Validation { message: e.message, context: Some("pagination".into()) }
        }
    }

    impl From<ApiStateError> for PokemonError {
        fn from(e: ApiStateError) -> Self {
            Self::Internal { message: e.to_string().into(), context: Some("state".into()) }
        }
    }

    impl IntoResponse for PokemonError {
        fn into_response(self) -> Response {
            let status = match &self {
                Self::NotFound { .. } => StatusCode::NOT_FOUND,
                Self::DuplicateKey { .. } | Self::Validation { .. } => StatusCode::BAD_REQUEST,
                Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            };
            if status.is_server_error() {
                error!(error = %self, "Pokemon request failed");
                return error_response(status, "Internal server error - check server logs");
            }
            error_response(status, self.to_string())
        }
    }
}

fn render_key_value(fields: &KeyValue) -> String {
    serde_json::to_string(fields).unwrap_or_default()
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_maps_to_duplicate_key() {
        let err = handle_store_error(StoreError::duplicate("name", "pikachu"));
        assert_eq!(err.to_string(), r#"Pokemon already exists in db {"name":"pikachu"}"#);
        let PokemonError::DuplicateKey { fields } = err else { panic!("expected DuplicateKey") };
        assert_eq!(fields["name"], "pikachu");
    }

    #[test]
    fn backend_failure_maps_to_internal_with_context() {
        let failed: Result<(), StoreError> =
            Err(StoreError::Backend { message: "socket closed".into(), context: None });
        let err = handle_store_error(failed.context("Creating pokemon").unwrap_err());
        assert!(matches!(err, PokemonError::Internal { .. }));
        assert_eq!(err.to_string(), "Internal error (Creating pokemon): socket closed");
    }

    #[test]
    fn not_found_messages_carry_the_term() {
        assert_eq!(
            PokemonError::not_found("PIKACHU ").to_string(),
            r#"Pokemon with id, name or no "PIKACHU " not found"#
        );
        let err = PokemonError::id_not_found("65a1f0c2e4b0a1b2c3d4e5f6");
        let PokemonError::NotFound { term, .. } = &err else { panic!("expected NotFound") };
        assert_eq!(term, "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(err.to_string(), r#"Pokemon with id "65a1f0c2e4b0a1b2c3d4e5f6" not found"#);
    }
}
