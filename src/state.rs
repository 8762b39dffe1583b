use std::sync::Arc;

use crate::allow_list::AllowList;
use crate::services::validation::TokenValidator;

/// Shared, immutable context for the filter chain. Cloned per request; both
/// fields are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<TokenValidator>,
    pub allow_list: Arc<AllowList>,
}

impl AppState {
    pub fn new(validator: Arc<TokenValidator>, allow_list: Arc<AllowList>) -> Self {
        Self {
            validator,
            allow_list,
        }
    }
}
