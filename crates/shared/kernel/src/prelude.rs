//! Common imports for feature slices.

pub use crate::config::{ConfigError, load_config};
pub use pokedex_domain::config::ApiConfig;
pub use pokedex_domain::pagination::Pagination;
pub use pokedex_domain::registry::{FeatureSlice, InitializedSlice};

#[cfg(feature = "server")]
pub use crate::server::{
    ApiState, ApiStateError, ErrorBody, PaginationError, PaginationQuery, error_response,
};
