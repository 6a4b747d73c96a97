//! Kernel utilities shared across slices.
//! Keep this crate lightweight: layered config loading, plus (behind `server`) the
//! application state, error bodies, pagination extraction, and system routes.
//!
//! ## Config loading
//! ```rust,ignore
//! use pokedex_kernel::config::load_config;
//! use pokedex_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(Some("server")).unwrap();
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use pokedex_domain as domain;
