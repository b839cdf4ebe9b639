use std::sync::Arc;

use crate::store::Store;
use crate::token::JwtKeys;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub keys: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, keys: JwtKeys) -> Self {
        Self {
            store,
            keys: Arc::new(keys),
        }
    }
}
