//! Layered carousel settings: built-in defaults, an optional TOML file, then
//! `CAROUSEL__*` environment variables.

use std::{path::Path, time::Duration};

use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use shared::error::CarouselError;

use crate::controller::CarouselOptions;

pub const ENV_PREFIX: &str = "CAROUSEL";
pub const DEFAULT_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    pub auto_advance: bool,
    pub interval_ms: u64,
    pub restart_on_navigate: bool,
    pub start_index: usize,
    pub slide_titles: Vec<String>,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            auto_advance: true,
            interval_ms: DEFAULT_INTERVAL_MS,
            restart_on_navigate: true,
            start_index: 0,
            slide_titles: Vec::new(),
        }
    }
}

impl CarouselSettings {
    /// Loads settings from `path` (if it exists) and the process environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CarouselError> {
        Self::load_with_env(path, None)
    }

    /// Like [`load`](Self::load) but reads variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: impl AsRef<Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, CarouselError> {
        let settings: Self = Config::builder()
            .add_source(
                File::from(path.as_ref())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("slide_titles")
                    .source(env),
            )
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(settings_error)?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CarouselError> {
        let settings: Self = toml::from_str(raw).map_err(settings_error)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String, CarouselError> {
        toml::to_string_pretty(self).map_err(settings_error)
    }

    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.auto_advance && self.interval_ms == 0 {
            return Err(CarouselError::invalid_configuration(
                "interval_ms must be positive while auto_advance is enabled",
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn options(&self) -> CarouselOptions {
        CarouselOptions {
            start_index: self.start_index,
            restart_on_navigate: self.restart_on_navigate,
        }
    }
}

fn settings_error(err: impl std::error::Error + Send + Sync + 'static) -> CarouselError {
    CarouselError::Settings {
        source: Box::new(err),
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
