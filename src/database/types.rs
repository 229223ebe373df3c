//! Database storage types and functions

use sqlx::migrate::Migrator;

/// Migrator to run migrations on startup
///
/// Every migration only creates what is missing, running it again is a no-op
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Name of the database file inside the data directory
pub const DATABASE_FILE: &str = "apartments.db";

/// Upper bound of open connections in the pool
pub const MAX_CONNECTIONS: u32 = 25;

/// Connections are recycled after this many seconds
pub const MAX_CONNECTION_LIFETIME_SECS: u64 = 5 * 60;

/// How long acquiring a connection waits for a free one
///
/// An exhausted pool makes requests wait, only after this long they fail with a storage error
pub const ACQUIRE_TIMEOUT_SECS: u64 = 30;
