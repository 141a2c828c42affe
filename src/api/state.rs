//! Shared application state for the HTTP handlers

use std::sync::Arc;

use crate::knowledge_base::KnowledgeBase;

pub struct AppState {
    pub kb: Arc<KnowledgeBase>,
}

impl AppState {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}
