use crate::store_api::{GatewayError, HttpGateway};
use app_state::StoreApiSettings;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};
use url::Url;

/// [`HttpGateway`] talking to StoreApi over HTTP.
#[derive(Clone, Debug)]
pub struct StoreApiClient {
    http_client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl StoreApiClient {
    /// `base_url` should end with `/` so endpoint paths join beneath it.
    pub const fn new(http_client: Client, base_url: Url) -> Self {
        Self {
            http_client,
            base_url,
            api_key: None,
        }
    }

    /// Sends the key as bearer token with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn from_settings(settings: &StoreApiSettings) -> Result<Self, GatewayError> {
        let http_client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;
        let client = Self::new(http_client, settings.base_url.clone());
        Ok(match &settings.api_key {
            Some(key) => client.with_api_key(key.as_str()),
            None => client,
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl HttpGateway for StoreApiClient {
    #[instrument(skip(self, body), fields(base_url = %self.base_url))]
    async fn get(&self, path: &str, body: &BTreeMap<String, String>) -> Result<Value, GatewayError> {
        let url = self.base_url.join(path)?;

        let mut request = self.http_client.get(url.clone()).json(body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }
        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!("Remote server {url} returned {status}");
            return Err(GatewayError::RemoteServer {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("Remote server {url} returned {status}");
        Ok(serde_json::from_str(&text)?)
    }
}
