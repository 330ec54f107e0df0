use std::sync::Arc;

use crate::config::Config;
use crate::session::SessionStore;
use crate::upstream::Backend;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<dyn Backend>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn Backend>) -> Self {
        Self {
            config: Arc::new(config),
            backend,
            sessions: SessionStore::new(),
        }
    }
}
