use crate::{DatabaseSettings, LoggingSettings, RawSettings, RawStoreApiSettings};
use color_eyre::eyre::{Result, eyre};
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub store_api: StoreApiSettings,
}

/// Connection settings for the remote StoreApi service.
#[derive(Debug, Clone)]
pub struct StoreApiSettings {
    /// Always ends with `/`, so relative endpoint paths join beneath it.
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
    pub api_key: Option<String>,
}

impl TryFrom<RawSettings> for AppSettings {
    type Error = color_eyre::Report;

    fn try_from(raw: RawSettings) -> Result<Self> {
        Ok(Self {
            logging: raw.logging,
            database: raw.database,
            store_api: raw.store_api.try_into()?,
        })
    }
}

impl TryFrom<RawStoreApiSettings> for StoreApiSettings {
    type Error = color_eyre::Report;

    fn try_from(raw: RawStoreApiSettings) -> Result<Self> {
        let mut base_url: Url = raw
            .base_url
            .parse()
            .map_err(|e| eyre!("Invalid store_api.base_url {:?}: {e}", raw.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(eyre!("store_api.base_url cannot be a base: {base_url}"));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(raw.timeout_secs),
            user_agent: raw.user_agent,
            api_key: raw.api_key.filter(|key| !key.is_empty()),
        })
    }
}

impl DatabaseSettings {
    #[must_use]
    pub const fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout)
    }

    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_store_api(base_url: &str) -> RawStoreApiSettings {
        RawStoreApiSettings {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            user_agent: "test".to_string(),
            api_key: Some(String::new()),
        }
    }

    #[test]
    fn base_url_gets_trailing_slash() -> Result<()> {
        let settings = StoreApiSettings::try_from(raw_store_api("https://example.com/storeapi"))?;
        assert_eq!(settings.base_url.as_str(), "https://example.com/storeapi/");
        assert_eq!(
            settings.base_url.join("auth/login")?.as_str(),
            "https://example.com/storeapi/auth/login"
        );
        Ok(())
    }

    #[test]
    fn empty_api_key_is_none() -> Result<()> {
        let settings = StoreApiSettings::try_from(raw_store_api("https://example.com"))?;
        assert!(settings.api_key.is_none());
        assert_eq!(settings.timeout, Duration::from_secs(5));
        Ok(())
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(StoreApiSettings::try_from(raw_store_api("not a url")).is_err());
        assert!(StoreApiSettings::try_from(raw_store_api("mailto:someone@example.com")).is_err());
    }
}
