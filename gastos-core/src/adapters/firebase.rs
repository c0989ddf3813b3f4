//! Firebase identity verification
//!
//! Verifies ID tokens by asking the Identity Toolkit who they belong to
//! (`accounts:lookup`). Tokens the service refuses come back as
//! `Unauthenticated`; transport failures and unexpected statuses as `Fetch`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::Principal;
use crate::ports::IdentityProvider;

pub const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// Get the Identity Toolkit base URL from environment or default
pub fn get_base_url() -> String {
    std::env::var("FIREBASE_AUTH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    disabled: bool,
}

/// Identity provider backed by Firebase Authentication
pub struct FirebaseIdentityProvider {
    client: Client,
    api_key: String,
    lookup_url: Url,
}

impl FirebaseIdentityProvider {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::new_with_base_url(api_key, &get_base_url())
    }

    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::config(format!(
                "Missing env {}",
                crate::config::IDENTITY_API_KEY_ENV
            )));
        }

        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Error::config(format!("Invalid identity provider URL {:?}: {}", base_url, e)))?;
        let lookup_url = base
            .join("/v1/accounts:lookup")
            .map_err(|e| Error::config(format!("Invalid identity provider URL {:?}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| Error::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.trim().to_string(),
            lookup_url,
        })
    }

    pub fn lookup_url(&self) -> &Url {
        &self.lookup_url
    }

    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::fetch("Identity provider timed out")
        } else if error.is_connect() {
            Error::fetch("Unable to connect to the identity provider")
        } else {
            Error::fetch(format!("Identity provider request failed: {}", error))
        }
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    fn name(&self) -> &str {
        "firebase"
    }

    async fn verify(&self, token: &str) -> Result<Principal> {
        let response = self
            .client
            .post(self.lookup_url.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({ "idToken": token }))
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        match response.status().as_u16() {
            200 => {}
            // INVALID_ID_TOKEN, TOKEN_EXPIRED, USER_NOT_FOUND, ...
            400 | 401 => return Err(Error::Unauthenticated),
            status => return Err(Error::fetch(format!("Identity provider error: HTTP {}", status))),
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| Error::fetch(format!("Failed to parse identity provider response: {}", e)))?;

        let user = lookup
            .users
            .into_iter()
            .next()
            .ok_or(Error::Unauthenticated)?;
        if user.disabled {
            return Err(Error::Unauthenticated);
        }

        Ok(Principal::new(user.local_id, user.email))
    }
}
