use std::sync::Arc;

use crate::services::backend::ConversationBackend;

// ---------- Shared handler state ----------

#[derive(Clone)]
pub struct App {
    pub backend: Arc<dyn ConversationBackend>,
    /// Fixed backend endpoint; when unset it is derived from the request Host
    pub backend_url: Option<String>,
    /// Shared secret expected as `Authorization: Bearer <key>`; unset disables the gate
    pub api_key: Option<String>,
}

impl App {
    pub fn new(backend: Arc<dyn ConversationBackend>) -> Self {
        Self {
            backend,
            backend_url: None,
            api_key: None,
        }
    }

    pub fn with_backend_url(mut self, url: Option<String>) -> Self {
        self.backend_url = url;
        self
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }
}
