pub mod runtime;

pub use runtime::*;

use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, SignalError};

pub const ENV_PREFIX: &str = "OHLC_SIGNALS";

/// Loads settings from a TOML file with `OHLC_SIGNALS_*` environment overrides,
/// nested keys joined by `__` (`OHLC_SIGNALS_MOMENTUM__K=3`).
/// A missing file yields the defaults plus any overrides.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let mut builder = config::Config::builder();

    if path.exists() {
        info!("Loading configuration from {}", path.display());
        builder = builder.add_source(config::File::from(path));
    } else {
        debug!("No configuration file at {}, using defaults", path.display());
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: PipelineConfig = settings.try_deserialize()?;
    config
        .validate()
        .map_err(|errors| SignalError::Config(errors.join(", ")))?;
    Ok(config)
}
