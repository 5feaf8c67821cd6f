//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! Content lives in Postgres only, so the state is just the pool plus the
//! admin token guarding dashboard writes.

use std::sync::Arc;

use sqlx::PgPool;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Bearer token required by admin routes. `None` disables them.
    pub admin_token: Option<Arc<str>>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, admin_token: Option<String>) -> Self {
        Self { pool, admin_token: admin_token.map(Arc::from) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
