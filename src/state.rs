use crate::db::{DbPool, OrmConn};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    /// Lifetime of a login session, from `SESSION_TTL_HOURS`.
    pub session_ttl_hours: i64,
}
