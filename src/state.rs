use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::access::AccessStore;
use crate::auth::JwtSettings;
use crate::database::PgAccessStore;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub access: Arc<dyn AccessStore>,
    pub jwt: JwtSettings,
}

impl AppState {
    /// Production wiring: access checks read the same pool as the handlers.
    pub fn new(db: PgPool, jwt: JwtSettings) -> Self {
        let access = Arc::new(PgAccessStore::new(db.clone()));
        Self { db, access, jwt }
    }

    /// Swap the access store, e.g. for an in-memory fixture.
    pub fn with_access_store(mut self, access: Arc<dyn AccessStore>) -> Self {
        self.access = access;
        self
    }
}
