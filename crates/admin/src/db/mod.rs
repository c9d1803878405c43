//! Storage gateway over a local SQLite database.
//!
//! # Collections
//!
//! - `categorias` - [`Category`](catalog_core::Category) records
//! - `productos` - [`Product`](catalog_core::Product) records
//!
//! Each collection is a table keyed by an auto-assigned integer id. Records
//! are stored as JSON documents next to the columns the store indexes:
//! `name_key` (case-folded name, both tables) and `category_id` (products).
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/`, embedded at compile
//! time and applied by [`Store::open`]. The highest applied migration is the
//! store version; an up-to-date store applies nothing when reopened:
//! ```bash
//! cargo run -p catalog-cli -- migrate
//! ```

pub mod categories;
pub mod products;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::migrate::Migrator;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::{debug, info, instrument};

use catalog_core::CategoryId;

use crate::config::CatalogConfig;

pub use categories::CascadeReport;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened or provisioned.
    #[error("catalog store unavailable: {0}")]
    Initialization(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A write was rejected or failed.
    #[error("write to {collection} failed: {source}")]
    Write {
        collection: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// A replace was attempted on a record without a usable id.
    #[error("write to {collection} rejected: record has no valid id")]
    MissingKey { collection: &'static str },

    /// A record could not be serialized for storage.
    #[error("could not encode {collection} record: {source}")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A read failed.
    #[error("read from {collection} failed: {source}")]
    Query {
        collection: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Data in the database is corrupted or invalid.
    #[error("data corruption in {collection}: {reason}")]
    DataCorruption {
        collection: &'static str,
        reason: String,
    },
}

impl StoreError {
    fn initialization(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Initialization(source.into())
    }

    /// Whether the error came from a rejected or failed write.
    #[must_use]
    pub const fn is_write_error(&self) -> bool {
        matches!(
            self,
            Self::Write { .. } | Self::MissingKey { .. } | Self::Encode { .. }
        )
    }

    /// Whether the write broke a key constraint (e.g. a duplicate id on `add`).
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Write {
                source: sqlx::Error::Database(e),
                ..
            } => e.is_unique_violation() || e.is_check_violation(),
            _ => false,
        }
    }
}

// =============================================================================
// Collections and Records
// =============================================================================

/// A named collection of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Categories,
    Products,
}

impl Collection {
    /// Every collection, in provisioning order.
    pub const ALL: [Self; 2] = [Self::Categories, Self::Products];

    /// The table backing the collection.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Categories => "categorias",
            Self::Products => "productos",
        }
    }

    /// Whether the collection keeps a `category_id` index column.
    #[must_use]
    pub const fn has_category_index(self) -> bool {
        matches!(self, Self::Products)
    }

    const fn insert_sql(self) -> &'static str {
        match self {
            Self::Categories => "INSERT INTO categorias (id, name_key, record) VALUES (?1, ?2, ?3)",
            Self::Products => {
                "INSERT INTO productos (id, name_key, record, category_id) VALUES (?1, ?2, ?3, ?4)"
            }
        }
    }

    const fn put_sql(self) -> &'static str {
        match self {
            Self::Categories => {
                r"
                INSERT INTO categorias (id, name_key, record) VALUES (?1, ?2, ?3)
                ON CONFLICT (id) DO UPDATE SET name_key = excluded.name_key, record = excluded.record
                "
            }
            Self::Products => {
                r"
                INSERT INTO productos (id, name_key, record, category_id) VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT (id) DO UPDATE SET name_key = excluded.name_key,
                    record = excluded.record, category_id = excluded.category_id
                "
            }
        }
    }

    const fn delete_sql(self) -> &'static str {
        match self {
            Self::Categories => "DELETE FROM categorias WHERE id = ?1",
            Self::Products => "DELETE FROM productos WHERE id = ?1",
        }
    }

    const fn select_all_sql(self) -> &'static str {
        match self {
            Self::Categories => "SELECT id, record FROM categorias ORDER BY id",
            Self::Products => "SELECT id, record FROM productos ORDER BY id",
        }
    }

    const fn select_by_id_sql(self) -> &'static str {
        match self {
            Self::Categories => "SELECT id, record FROM categorias WHERE id = ?1",
            Self::Products => "SELECT id, record FROM productos WHERE id = ?1",
        }
    }

    const fn select_by_name_sql(self) -> &'static str {
        match self {
            Self::Categories => "SELECT id, record FROM categorias WHERE name_key = ?1 ORDER BY id",
            Self::Products => "SELECT id, record FROM productos WHERE name_key = ?1 ORDER BY id",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// A record type stored in one collection.
pub trait Record: Serialize + DeserializeOwned + Send + Sync + Unpin {
    /// The record's id type.
    type Id: Copy + Send + Sync + Into<i64> + From<i64> + fmt::Display + fmt::Debug;

    /// The collection holding records of this type.
    const COLLECTION: Collection;

    /// The id, if the record has been stored.
    fn id(&self) -> Option<Self::Id>;

    /// Attach the id the store knows the record by.
    fn set_id(&mut self, id: Self::Id);

    /// The name indexed for fallback lookups.
    fn name(&self) -> &str;

    /// Value of the `category_id` index column, for collections that have one.
    fn category_key(&self) -> Option<CategoryId> {
        None
    }
}

/// An id that names a record in a known collection.
pub trait RecordId: Copy + Send + Sync + Into<i64> + fmt::Display {
    type Record: Record<Id = Self>;
}

/// Fold a name into the form used by the `name_key` index.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Internal row type shared by both collections.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: i64,
    record: String,
}

impl DocumentRow {
    fn decode<R: Record>(self) -> Result<R, StoreError> {
        let mut record: R =
            serde_json::from_str(&self.record).map_err(|e| StoreError::DataCorruption {
                collection: R::COLLECTION.table(),
                reason: format!("record {}: {e}", self.id),
            })?;
        record.set_id(R::Id::from(self.id));
        Ok(record)
    }
}

// =============================================================================
// Store
// =============================================================================

/// Handle to the catalog database.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the database and apply any pending migrations.
    ///
    /// Opening an already provisioned database is a no-op beyond connecting.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Initialization` if the URL is invalid, the
    /// database cannot be opened, or a migration fails.
    #[instrument(skip(config), fields(url = %config.database_url))]
    pub async fn open(config: &CatalogConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(StoreError::initialization)?
            .create_if_missing(true);

        let pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout);
        let pool_options = if config.is_in_memory() {
            // The database lives and dies with its one connection.
            pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(StoreError::initialization)?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(StoreError::initialization)?;

        info!(version = Self::latest_version(), "Catalog store ready");
        Ok(Self { pool })
    }

    /// Open a private in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Initialization` if provisioning fails.
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::open(&CatalogConfig::in_memory()).await
    }

    /// The schema version this build provisions.
    #[must_use]
    pub fn latest_version() -> i64 {
        MIGRATOR.iter().map(|m| m.version).max().unwrap_or(0)
    }

    /// The highest migration version applied to this database.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Query` if the migrations table cannot be read.
    pub async fn schema_version(&self) -> Result<Option<i64>, StoreError> {
        sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(version) FROM _sqlx_migrations WHERE success = 1",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|source| StoreError::Query {
            collection: "_sqlx_migrations",
            source,
        })
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Insert a new record and return its id.
    ///
    /// A record that already carries an id is stored under that id;
    /// otherwise the store assigns the next one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the insert fails, including when the
    /// id is already taken.
    pub async fn add<R: Record>(&self, record: &R) -> Result<R::Id, StoreError> {
        let collection = R::COLLECTION;
        let key = record.id().map(Into::into);

        let result = bind_record(collection.insert_sql(), key, record)?
            .execute(&self.pool)
            .await
            .map_err(|source| StoreError::Write {
                collection: collection.table(),
                source,
            })?;

        let id = R::Id::from(result.last_insert_rowid());
        debug!(%collection, %id, "Added record");
        Ok(id)
    }

    /// Insert or replace a record by its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingKey` if the record has no positive id and
    /// `StoreError::Write` if the write fails.
    pub async fn put<R: Record>(&self, record: &R) -> Result<R::Id, StoreError> {
        let collection = R::COLLECTION;
        let id = record
            .id()
            .filter(|id| Into::<i64>::into(*id) > 0)
            .ok_or(StoreError::MissingKey {
                collection: collection.table(),
            })?;

        bind_record(collection.put_sql(), Some(id.into()), record)?
            .execute(&self.pool)
            .await
            .map_err(|source| StoreError::Write {
                collection: collection.table(),
                source,
            })?;

        debug!(%collection, %id, "Put record");
        Ok(id)
    }

    /// Delete a record by id. Deleting a missing id succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Write` if the delete fails.
    pub async fn delete<I: RecordId>(&self, id: I) -> Result<(), StoreError> {
        let collection = I::Record::COLLECTION;
        let key: i64 = id.into();
        let result = sqlx::query(collection.delete_sql())
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|source| StoreError::Write {
                collection: collection.table(),
                source,
            })?;

        debug!(%collection, %id, removed = result.rows_affected(), "Deleted record");
        Ok(())
    }

    /// Every record in the collection, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Query` if the read fails and
    /// `StoreError::DataCorruption` if a stored record cannot be decoded.
    pub async fn get_all<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let collection = R::COLLECTION;
        let rows = sqlx::query_as::<_, DocumentRow>(collection.select_all_sql())
            .fetch_all(&self.pool)
            .await
            .map_err(|source| StoreError::Query {
                collection: collection.table(),
                source,
            })?;

        rows.into_iter().map(DocumentRow::decode).collect()
    }

    /// Get a record by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Query` if the read fails and
    /// `StoreError::DataCorruption` if the stored record cannot be decoded.
    pub async fn get_by_id<I: RecordId>(&self, id: I) -> Result<Option<I::Record>, StoreError> {
        let collection = I::Record::COLLECTION;
        let key: i64 = id.into();
        let row = sqlx::query_as::<_, DocumentRow>(collection.select_by_id_sql())
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|source| StoreError::Query {
                collection: collection.table(),
                source,
            })?;

        row.map(DocumentRow::decode).transpose()
    }

    /// Every record whose name matches `name` case-insensitively, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Query` if the read fails and
    /// `StoreError::DataCorruption` if a stored record cannot be decoded.
    pub async fn find_by_name<R: Record>(&self, name: &str) -> Result<Vec<R>, StoreError> {
        let collection = R::COLLECTION;
        let rows = sqlx::query_as::<_, DocumentRow>(collection.select_by_name_sql())
            .bind(name_key(name))
            .fetch_all(&self.pool)
            .await
            .map_err(|source| StoreError::Query {
                collection: collection.table(),
                source,
            })?;

        rows.into_iter().map(DocumentRow::decode).collect()
    }
}

/// Bind the id, index columns and JSON body of a record to a write statement.
fn bind_record<R: Record>(
    sql: &'static str,
    key: Option<i64>,
    record: &R,
) -> Result<Query<'static, Sqlite, SqliteArguments<'static>>, StoreError> {
    let collection = R::COLLECTION;
    let body = serde_json::to_string(record).map_err(|source| StoreError::Encode {
        collection: collection.table(),
        source,
    })?;

    let query = sqlx::query(sql)
        .bind(key)
        .bind(name_key(record.name()))
        .bind(body);

    Ok(if collection.has_category_index() {
        query.bind(record.category_key())
    } else {
        query
    })
}
