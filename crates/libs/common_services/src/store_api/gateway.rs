use crate::store_api::GatewayError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// A signed GET call with a JSON body against a remote service.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// Sends `body` as JSON to `path` (relative to the gateway's base url) and
    /// returns the parsed response body.
    async fn get(&self, path: &str, body: &BTreeMap<String, String>) -> Result<Value, GatewayError>;
}
