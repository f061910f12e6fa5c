use crate::{AppSettings, DEFAULT_SETTINGS_PATH, ENV_PREFIX, RawSettings};
use color_eyre::eyre::Result;
use std::path::Path;
use tracing::debug;

/// Load the app settings from `config/settings.yaml` + environment variables.
pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite the db url from env.
    dotenv::from_path(".env").ok();
    load_app_settings_from(DEFAULT_SETTINGS_PATH)
}

/// Load the app settings from a specific YAML file + environment variables.
pub fn load_app_settings_from(path: impl AsRef<Path>) -> Result<AppSettings> {
    let config_path = path.as_ref().canonicalize()?;
    debug!("Loading settings from {}", config_path.display());

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    raw_settings.try_into()
}
