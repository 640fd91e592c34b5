/*
 * Responsibility
 * - RS256-pinned signature verification and standard claim checks
 * - Non-verifying header decode (key lookup only, never trusted)
 */
use jsonwebtoken::{Algorithm, Header, Validation, decode, decode_header};
use serde::Deserialize;

use super::error::AuthError;
use super::key::ResolvedSigningKey;

/// Decode the token header without verifying anything.
///
/// The result is only good for picking a verification key (`kid`); it must
/// never feed an authorization decision.
pub fn decode_unverified_header(token: &str) -> Result<Header, AuthError> {
    decode_header(token).map_err(map_jwt_error)
}

/// Claims of a verified token. Only meaningful after `TokenVerifier::verify`
/// succeeds.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: u64,

    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub nbf: Option<u64>,
    #[serde(default)]
    pub iss: Option<String>,
    // `aud` can be a string or an array of strings; keep it as a Value and
    // let Validation handle audience checks.
    #[serde(default)]
    pub aud: serde_json::Value,
}

#[derive(Debug, Clone)]
pub struct TokenVerifier {
    issuer: Option<String>,
    audience: Option<String>,
    leeway_seconds: u64,
}

impl TokenVerifier {
    pub fn new(issuer: Option<String>, audience: Option<String>, leeway_seconds: u64) -> Self {
        Self {
            issuer,
            audience,
            leeway_seconds,
        }
    }

    /// Verify signature and standard claims with the resolved key.
    ///
    /// Verification is constrained to RS256; whatever algorithm the token
    /// header claims is never honored (algorithm-substitution defense: a
    /// public RSA key must not be usable as an HMAC secret).
    pub fn verify(
        &self,
        token: &str,
        key: &ResolvedSigningKey,
    ) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = self.leeway_seconds;

        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        let data =
            decode::<TokenClaims>(token, &key.decoding_key, &validation).map_err(map_jwt_error)?;

        Ok(data.claims)
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::MalformedToken,
        // Wrong signature, wrong algorithm, claim mismatches: keep the
        // library error as source for log detail.
        _ => AuthError::InvalidSignature(err),
    }
}
