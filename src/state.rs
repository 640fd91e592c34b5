/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone is cheap (inner services are Arc)
 */
use std::sync::Arc;

use crate::services::auth::Authorizer;

#[derive(Clone)]
pub struct AppState {
    pub authorizer: Arc<Authorizer>,
}

impl AppState {
    pub fn new(authorizer: Arc<Authorizer>) -> Self {
        Self { authorizer }
    }
}
