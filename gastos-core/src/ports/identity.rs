//! Identity provider port

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::Principal;

/// Verifies bearer tokens issued by a third-party identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Provider name (e.g., "firebase")
    fn name(&self) -> &str;

    /// Verify `token` and return who it belongs to
    ///
    /// A token the provider rejects yields `Error::Unauthenticated`; a
    /// provider that cannot be reached yields `Error::Fetch`.
    async fn verify(&self, token: &str) -> Result<Principal>;
}
