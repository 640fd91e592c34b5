/*
 * Responsibility
 * - Authorize request DTO (TOKEN-authorizer event shape)
 *
 * The response body is the policy document itself
 * (services::auth::policy::AuthorizerResponse), so no response DTO here.
 */
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AuthorizeRequest {
    /// Raw `Authorization` header value, conventionally `Bearer <token>`.
    /// Absent is treated the same as an empty header (-> Deny).
    #[serde(default, rename = "authorizationToken")]
    pub authorization_token: Option<String>,

    /// Resource the caller wants to invoke. Carried for log context only;
    /// the issued policy is always scoped to the wildcard resource.
    #[serde(default, rename = "methodArn")]
    pub method_arn: Option<String>,
}
