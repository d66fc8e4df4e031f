use crate::model::{DbConnection, ModelManager};

/// Shared handler state. Cloned per request; the pool inside is reference counted.
#[derive(Debug, Clone)]
pub struct AppState {
    mm: ModelManager,
}

impl AppState {
    pub fn new(mm: ModelManager) -> Self {
        Self { mm }
    }

    pub fn mm(&self) -> &ModelManager {
        &self.mm
    }
}

impl From<DbConnection> for AppState {
    fn from(db: DbConnection) -> Self {
        Self::new(ModelManager::new(db))
    }
}
