/*
 * Responsibility
 * - Extract the bearer token from a raw Authorization header value
 * - Pure string handling; structural token validation belongs to the verifier
 */
use super::error::AuthError;

/// Returns the substring after the first space, untouched.
///
/// The scheme prefix is matched case-insensitively (`Bearer`, `bearer`,
/// `BEARER` are all accepted).
pub fn extract_token(header_value: &str) -> Result<&str, AuthError> {
    if header_value.is_empty() {
        return Err(AuthError::MissingHeader);
    }

    let (scheme, token) = header_value
        .split_once(' ')
        .ok_or(AuthError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }

    Ok(token)
}
