use crate::store_api::{GatewayError, HttpGateway};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::instrument;

pub const LOGIN_PATH: &str = "auth/login";
pub const TOKEN_CHECK_PATH: &str = "auth/check";

/// The remote service's answer, untouched. Whether it means success is up to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthResponse(Value);

impl AuthResponse {
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// A top-level field of the response, if the response is an object that has it.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[must_use]
    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Shop account authentication against StoreApi.
#[derive(Clone, Debug)]
pub struct AuthGateway<G> {
    gateway: G,
}

impl<G: HttpGateway> AuthGateway<G> {
    pub const fn new(gateway: G) -> Self {
        Self { gateway }
    }

    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        shopware_id: &str,
        password: &str,
    ) -> Result<AuthResponse, GatewayError> {
        let body = BTreeMap::from([
            ("shopwareID".to_string(), shopware_id.to_string()),
            ("password".to_string(), password.to_string()),
        ]);
        self.gateway
            .get(LOGIN_PATH, &body)
            .await
            .map(AuthResponse::new)
    }

    #[instrument(skip(self, token))]
    pub async fn is_token_valid(
        &self,
        shopware_id: &str,
        token: &str,
    ) -> Result<AuthResponse, GatewayError> {
        let body = BTreeMap::from([
            ("shopwareID".to_string(), shopware_id.to_string()),
            ("token".to_string(), token.to_string()),
        ]);
        self.gateway
            .get(TOKEN_CHECK_PATH, &body)
            .await
            .map(AuthResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use color_eyre::eyre::Result;
    use serde_json::json;
    use std::error::Error;
    use std::io;
    use std::sync::Mutex;

    /// Answers with the path and body it was called with.
    #[derive(Default)]
    struct EchoGateway {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpGateway for EchoGateway {
        async fn get(
            &self,
            path: &str,
            body: &BTreeMap<String, String>,
        ) -> Result<Value, GatewayError> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(path.to_string());
            }
            Ok(json!({ "path": path, "body": body }))
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl HttpGateway for FailingGateway {
        async fn get(&self, _: &str, _: &BTreeMap<String, String>) -> Result<Value, GatewayError> {
            Err(GatewayError::Transport(Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "network is down",
            ))))
        }
    }

    #[tokio::test]
    async fn login_forwards_credentials_to_login_path() -> Result<()> {
        let auth = AuthGateway::new(EchoGateway::default());

        let response = auth.login("user1", "pw").await?;

        assert_eq!(response.field("path"), Some(&json!("auth/login")));
        assert_eq!(
            response.field("body"),
            Some(&json!({ "shopwareID": "user1", "password": "pw" }))
        );
        Ok(())
    }

    #[tokio::test]
    async fn token_check_forwards_token_to_check_path() -> Result<()> {
        let auth = AuthGateway::new(EchoGateway::default());

        let response = auth.is_token_valid("user1", "tok123").await?;

        assert_eq!(
            response.into_inner(),
            json!({
                "path": "auth/check",
                "body": { "shopwareID": "user1", "token": "tok123" },
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn every_call_reaches_the_gateway() -> Result<()> {
        let auth = AuthGateway::new(EchoGateway::default());

        auth.is_token_valid("user1", "tok123").await?;
        auth.is_token_valid("user1", "tok123").await?;
        auth.login("user1", "pw").await?;

        let calls = auth.gateway.calls.lock().map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
        assert_eq!(*calls, vec!["auth/check", "auth/check", "auth/login"]);
        Ok(())
    }

    #[tokio::test]
    async fn transport_failure_keeps_its_cause() {
        let auth = AuthGateway::new(FailingGateway);

        let err = auth
            .is_token_valid("user1", "tok123")
            .await
            .expect_err("gateway is failing");

        assert!(matches!(err, GatewayError::Transport(_)));
        let cause = err
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .expect("io error is kept as source");
        assert_eq!(cause.kind(), io::ErrorKind::ConnectionRefused);
        assert!(err.to_string().contains("network is down"));
    }

    #[tokio::test]
    async fn remote_rejection_is_returned_as_is() -> Result<()> {
        struct RejectingGateway;

        #[async_trait]
        impl HttpGateway for RejectingGateway {
            async fn get(
                &self,
                _: &str,
                _: &BTreeMap<String, String>,
            ) -> Result<Value, GatewayError> {
                Ok(json!({ "success": false, "message": "invalid credentials" }))
            }
        }

        let response = AuthGateway::new(RejectingGateway).login("user1", "wrong").await?;

        assert_eq!(response.field("success"), Some(&json!(false)));
        assert_eq!(response.field("message"), Some(&json!("invalid credentials")));
        Ok(())
    }
}
