//! Identity gate - bearer token to allowed principal

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{AllowList, Principal};
use crate::ports::IdentityProvider;

/// Pull the token out of an `Authorization` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str> {
    let header = header.map(str::trim).ok_or(Error::Unauthenticated)?;
    let (scheme, token) = header.split_once(' ').ok_or(Error::Unauthenticated)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::Unauthenticated);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Unauthenticated);
    }
    Ok(token)
}

/// Verifies callers against the identity provider and the allow-list
pub struct IdentityGate {
    provider: Arc<dyn IdentityProvider>,
    allow_list: AllowList,
}

impl IdentityGate {
    pub fn new(provider: Arc<dyn IdentityProvider>, allow_list: AllowList) -> Self {
        Self {
            provider,
            allow_list,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Authorize a request given its raw `Authorization` header
    pub async fn authorize(&self, header: Option<&str>) -> Result<Principal> {
        let token = bearer_token(header)?;
        let principal = self.provider.verify(token).await?;

        if !self.allow_list.admits(&principal) {
            return Err(Error::Forbidden);
        }
        Ok(principal)
    }
}
