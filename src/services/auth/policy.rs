/*
 * Responsibility
 * - Authorization decision as consumed by the request-routing layer
 * - The JSON shape is a fixed integration contract; do not change field
 *   names or literals
 */
use serde::Serialize;

const POLICY_VERSION: &str = "2012-10-17";
const INVOKE_ACTION: &str = "execute-api:Invoke";
const ANY_RESOURCE: &str = "*";

/// Principal reported on every Deny, regardless of why the attempt failed.
const DENY_PRINCIPAL: &str = "user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    pub version: &'static str,
    #[serde(rename = "Statement")]
    pub statement: Vec<Statement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statement {
    #[serde(rename = "Action")]
    pub action: &'static str,
    #[serde(rename = "Effect")]
    pub effect: Effect,
    #[serde(rename = "Resource")]
    pub resource: &'static str,
}

impl AuthorizerResponse {
    pub fn allow(principal_id: impl Into<String>) -> Self {
        Self::with_effect(principal_id.into(), Effect::Allow)
    }

    /// Uniform deny: the same principal and shape for every failure kind,
    /// so the response leaks nothing about why authorization failed.
    pub fn deny() -> Self {
        Self::with_effect(DENY_PRINCIPAL.to_string(), Effect::Deny)
    }

    pub fn effect(&self) -> Effect {
        self.policy_document.statement[0].effect
    }

    fn with_effect(principal_id: String, effect: Effect) -> Self {
        Self {
            principal_id,
            policy_document: PolicyDocument {
                version: POLICY_VERSION,
                statement: vec![Statement {
                    action: INVOKE_ACTION,
                    effect,
                    resource: ANY_RESOURCE,
                }],
            },
        }
    }
}
