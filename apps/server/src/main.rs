use anyhow::Context;
use pokedex_kernel::config::{DEFAULT_CONFIG_FILE, load_config};
use pokedex_kernel::domain::config::{ApiConfig, LoggingConfig};
use pokedex_logger::{Logger, parse_level};
use pokedex_server::Server;

fn init_logger(cfg: &LoggingConfig) -> anyhow::Result<Logger> {
    let mut builder =
        Logger::builder().name(env!("CARGO_PKG_NAME")).level(parse_level(&cfg.level)?);
    if let Some(filter) = &cfg.filter {
        builder = builder.env_filter(filter);
    }

    let logger = match &cfg.path {
        Some(path) => builder.path(path).json(cfg.json).init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some(DEFAULT_CONFIG_FILE)).context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg.logging).context("Failed to initialize logging")?;

    Server::builder().config(cfg).build().await?.run().await
}
