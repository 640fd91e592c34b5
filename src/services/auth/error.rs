/*
 * Responsibility
 * - Error taxonomy for the authorization pipeline
 *
 * Every variant maps to the same uniform Deny at the boundary; the variant
 * only matters for logging. Nothing here is retried and nothing is fatal to
 * the process.
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no authentication header")]
    MissingHeader,

    #[error("invalid authentication header")]
    MalformedHeader,

    #[error("key set unavailable: {0}")]
    KeySetUnavailable(String),

    #[error("no valid signing key found")]
    NoMatchingSigningKey,

    #[error("certificate decode failed: {0}")]
    CertificateDecode(String),

    #[error("malformed token")]
    MalformedToken,

    #[error("signature verification failed: {0}")]
    InvalidSignature(#[source] jsonwebtoken::errors::Error),

    #[error("token expired")]
    TokenExpired,
}
