use config::{Config, Environment, File, Map};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix for environment overrides (`POKEDEX__DATABASE__URL` → `database.url`).
pub const ENV_PREFIX: &str = "POKEDEX";
/// Config file stem used when no path is given (`server.toml`, `server.yaml`, ...).
pub const DEFAULT_CONFIG_FILE: &str = "server";

/// Custom error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

trait ConfigResultExt<T> {
    fn context(self, context: &'static str) -> Result<T, ConfigError>;
}

impl<T> ConfigResultExt<T> for Result<T, config::ConfigError> {
    fn context(self, context: &'static str) -> Result<T, ConfigError> {
        self.map_err(|source| ConfigError::Config { source, context: Some(context.into()) })
    }
}

/// Loads typed configuration from a file overlaid with environment variables.
///
/// Layers, lowest precedence first:
/// 1. **Base File**: `path`, or `server` in the working directory. The file must exist;
///    its format is picked from the extension.
/// 2. **Environment Overrides**: variables prefixed with `POKEDEX__`, nested with `__`
///    (e.g. `POKEDEX__PAGINATION__DEFAULT_LIMIT=25`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing, a value is malformed,
/// or the merged tree does not deserialize into `T`.
///
/// # Example
/// ```rust
/// use pokedex_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with_env(path, None)
}

/// Same as [`load_config`], but reads overrides from `env` instead of the process
/// environment when a map is given.
///
/// Override values are parsed as bool, then integer, then float, before falling
/// back to a string, so `POKEDEX__LOGGING__JSON=true` lands on a `bool` field.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    env: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    debug!("Loading config from {}", effective_path.display());

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake)
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

#[allow(clippy::ref_option)]
fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
