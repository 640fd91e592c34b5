/*
 * Responsibility
 * - The bearer-token authorization pipeline:
 *   header -> token -> key set -> resolved key -> verified claims -> policy
 * - Collaborators are injected; each attempt is independent and sequential
 */
pub mod bearer;
pub mod error;
pub mod jwks;
pub mod key;
pub mod policy;
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_keys;

pub use error::AuthError;

use std::sync::Arc;

use self::jwks::KeySetFetcher;
use self::key::resolve_signing_key;
use self::policy::AuthorizerResponse;
use self::verifier::{TokenClaims, TokenVerifier};

pub struct Authorizer {
    key_sets: Arc<dyn KeySetFetcher>,
    verifier: TokenVerifier,
}

impl Authorizer {
    pub fn new(key_sets: Arc<dyn KeySetFetcher>, verifier: TokenVerifier) -> Self {
        Self { key_sets, verifier }
    }

    /// Total mapping from a raw Authorization header to a policy document.
    /// Never fails: every pipeline error becomes the uniform Deny, and the
    /// specific kind only reaches the logs.
    pub async fn authorize(&self, authorization_header: &str) -> AuthorizerResponse {
        match self.verify_token(authorization_header).await {
            Ok(claims) => {
                tracing::info!(sub = %claims.sub, "request authorized");
                AuthorizerResponse::allow(claims.sub)
            }
            Err(err) => {
                tracing::warn!(error = %err, "request not authorized");
                AuthorizerResponse::deny()
            }
        }
    }

    async fn verify_token(&self, authorization_header: &str) -> Result<TokenClaims, AuthError> {
        let token = bearer::extract_token(authorization_header)?;

        // Unverified header: good for key lookup only.
        let header = verifier::decode_unverified_header(token)?;
        let kid = header.kid.ok_or(AuthError::NoMatchingSigningKey)?;

        let keys = self.key_sets.fetch().await?;
        let key = match resolve_signing_key(&keys, &kid) {
            Ok(key) => key,
            Err(err @ AuthError::NoMatchingSigningKey) => {
                // The provider may have rotated its keys since we cached the
                // set; drop the cache so the next attempt refetches.
                self.key_sets.invalidate().await;
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        self.verifier.verify(token, &key)
    }
}
