/*
 * Responsibility
 * - Select the key-set entry matching the token's key id
 * - Build a verification key from the entry's leaf certificate (x5c[0])
 */
use jsonwebtoken::DecodingKey;
use openssl::x509::X509;

use super::error::AuthError;
use super::jwks::SigningKey;

// Standard PEM body line width.
const PEM_LINE_WIDTH: usize = 64;

/// Verification key for a single authorization attempt. Not cached.
pub struct ResolvedSigningKey {
    pub kid: String,
    /// Carried from the key-set entry; not independently enforced
    /// (the token's own `exp`/`nbf` claims are what the verifier checks).
    pub nbf: Option<u64>,
    pub decoding_key: DecodingKey,
}

pub fn resolve_signing_key(
    keys: &[SigningKey],
    kid: &str,
) -> Result<ResolvedSigningKey, AuthError> {
    let entry = select_entry(keys, kid).ok_or(AuthError::NoMatchingSigningKey)?;
    let decoding_key = decoding_key_from_leaf(&entry.x5c[0])?;

    Ok(ResolvedSigningKey {
        kid: entry.kid.clone(),
        nbf: entry.nbf,
        decoding_key,
    })
}

/// Structural checks come before the id match: a key that is wrong for
/// signing is rejected even if its id happens to match. Duplicate ids are
/// resolved first-in-document-order.
fn select_entry<'a>(keys: &'a [SigningKey], kid: &str) -> Option<&'a SigningKey> {
    keys.iter()
        .filter(|key| key.key_use == "sig" && key.kty == "RSA" && !key.x5c.is_empty())
        .find(|key| key.kid == kid)
}

/// Leaf certificate only; intermediates and roots in the chain are ignored.
/// This is not a chain-of-trust validation.
fn decoding_key_from_leaf(leaf_b64: &str) -> Result<DecodingKey, AuthError> {
    let pem = build_certificate_pem(leaf_b64)?;

    let cert = X509::from_pem(pem.as_bytes())
        .map_err(|e| AuthError::CertificateDecode(format!("invalid certificate: {e}")))?;
    let public_key_pem = cert
        .public_key()
        .and_then(|key| key.public_key_to_pem())
        .map_err(|e| AuthError::CertificateDecode(format!("no embedded public key: {e}")))?;

    DecodingKey::from_rsa_pem(&public_key_pem)
        .map_err(|e| AuthError::CertificateDecode(format!("not an RSA public key: {e}")))
}

/// Re-wrap the base64 payload at the standard line width between the PEM
/// certificate header and footer.
fn build_certificate_pem(b64: &str) -> Result<String, AuthError> {
    if !b64.is_ascii() {
        return Err(AuthError::CertificateDecode(
            "non-ascii certificate payload".to_string(),
        ));
    }

    let mut pem = String::with_capacity(b64.len() + b64.len() / PEM_LINE_WIDTH + 64);
    pem.push_str("-----BEGIN CERTIFICATE-----\n");
    // ASCII-only, so slicing at fixed byte offsets is safe.
    let mut rest = b64;
    while !rest.is_empty() {
        let (line, tail) = rest.split_at(rest.len().min(PEM_LINE_WIDTH));
        pem.push_str(line);
        pem.push('\n');
        rest = tail;
    }
    pem.push_str("-----END CERTIFICATE-----\n");

    Ok(pem)
}
