//! All things related to the storage of apartments

use core::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::sqlite::SqliteJournalMode;
use sqlx::sqlite::SqlitePoolOptions;

pub use Config as DatabaseConfig;
pub use form_types::*;

use crate::apartments::Apartment;
use types::ACQUIRE_TIMEOUT_SECS;
use types::DATABASE_FILE;
use types::MAX_CONNECTION_LIFETIME_SECS;
use types::MAX_CONNECTIONS;
use types::MIGRATOR;

mod form_types;
mod types;

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// A connection error with the storage
    Connection(String),

    /// The schema could not be brought up to date
    Migration(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Connection(error) => write!(f, "Connection error: {error}"),
            Error::Migration(error) => write!(f, "Migration error: {error}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Database configuration
pub enum Config {
    /// Open (or create) the database file inside this directory
    DataDir(PathBuf),

    /// Use existing connection
    ExistingConnection(SqlitePool),
}

/// SQLite storage
#[derive(Clone)]
pub struct Database {
    /// Pool of connections
    connection_pool: SqlitePool,
}

impl Database {
    /// Create a new SQLite storage
    ///
    /// The schema is initialized before the storage is handed out
    pub async fn from_config(config: Config) -> Result<Self> {
        match config {
            Config::DataDir(data_dir) => Self::new(&data_dir).await,
            Config::ExistingConnection(pool) => Self::new_with_pool(pool).await,
        }
    }

    /// Create SQLite storage in the data directory
    ///
    /// The directory and the database file are created when missing
    async fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir).map_err(connection_error)?;

        let database_path = data_dir.join(DATABASE_FILE);

        let options = SqliteConnectOptions::new()
            .filename(&database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let connection_pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .max_lifetime(Duration::from_secs(MAX_CONNECTION_LIFETIME_SECS))
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            .connect_with(options)
            .await
            .map_err(connection_error)?;

        tracing::info!("Using database at {}", database_path.display());

        Self::new_with_pool(connection_pool).await
    }

    /// Create SQLite storage with existing pool
    ///
    /// Migrations will be run
    async fn new_with_pool(connection_pool: SqlitePool) -> Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .map_err(|err| Error::Migration(err.to_string()))?;

        tracing::info!("Database schema initialized");

        Ok(Self { connection_pool })
    }
}

impl Database {
    /// Find all apartments
    ///
    /// Most recently created first
    pub async fn find_all_apartments(&self) -> Result<Vec<Apartment>> {
        let apartments = sqlx::query_as::<_, Apartment>(
            r"
            SELECT *
            FROM apartments
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(apartments)
    }

    /// Find a single apartment by ID
    pub async fn find_single_apartment_by_id(&self, id: i64) -> Result<Option<Apartment>> {
        let apartment = sqlx::query_as::<_, Apartment>(
            r"
            SELECT *
            FROM apartments
            WHERE id = ?1
            LIMIT 1
            ",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(apartment)
    }

    /// Create an apartment
    ///
    /// Both timestamps are set to the current time
    pub async fn create_apartment(&self, values: &ApartmentValues<'_>) -> Result<Apartment> {
        let now = Utc::now();

        let apartment = sqlx::query_as::<_, Apartment>(
            r"
            INSERT INTO apartments (
                address,
                visit_date,
                notes,
                rating,
                price,
                floor,
                is_gated,
                has_garage,
                has_laundry,
                created_at,
                updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            RETURNING *
            ",
        )
        .bind(values.address)
        .bind(values.visit_date)
        .bind(values.notes)
        .bind(values.rating)
        .bind(values.price)
        .bind(values.floor)
        .bind(values.is_gated)
        .bind(values.has_garage)
        .bind(values.has_laundry)
        .bind(now)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(apartment)
    }

    /// Replace all mutable fields of an apartment
    ///
    /// Returns `None` when there is no apartment with this ID, nothing is created then
    pub async fn update_apartment(
        &self,
        id: i64,
        values: &ApartmentValues<'_>,
    ) -> Result<Option<Apartment>> {
        let apartment = sqlx::query_as::<_, Apartment>(
            r"
            UPDATE apartments
            SET
                address = ?1,
                visit_date = ?2,
                notes = ?3,
                rating = ?4,
                price = ?5,
                floor = ?6,
                is_gated = ?7,
                has_garage = ?8,
                has_laundry = ?9,
                updated_at = ?10
            WHERE id = ?11
            RETURNING *
            ",
        )
        .bind(values.address)
        .bind(values.visit_date)
        .bind(values.notes)
        .bind(values.rating)
        .bind(values.price)
        .bind(values.floor)
        .bind(values.is_gated)
        .bind(values.has_garage)
        .bind(values.has_laundry)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(apartment)
    }

    /// Permanently delete an apartment
    ///
    /// Returns the ID of the deleted apartment, `None` when nothing was deleted
    pub async fn delete_apartment(&self, id: i64) -> Result<Option<i64>> {
        let deleted_id = sqlx::query_scalar::<_, i64>(
            r"
            DELETE FROM apartments
            WHERE id = ?1
            RETURNING id
            ",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(deleted_id)
    }
}

/// Map any error to a connection error
fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}
