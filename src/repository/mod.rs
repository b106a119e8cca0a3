use crate::db::{DbConnection, DbPool};

pub mod entry;
pub mod errors;

use errors::RepositoryResult;

/// Storage key holding the serialized wardrobe.
pub const WARDROBE_KEY: &str = "wardrobe";
/// Storage key holding the serialized user traits.
pub const USER_TRAITS_KEY: &str = "userTraits";

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only access to string-valued storage records.
pub trait StorageReader {
    /// Fetch the raw value stored under `key`.
    fn get_entry(&self, key: &str) -> RepositoryResult<Option<String>>;
}

/// Write access to string-valued storage records.
pub trait StorageWriter {
    /// Store `value` under `key`, overwriting any previous value.
    fn put_entry(&self, key: &str, value: &str) -> RepositoryResult<usize>;
}
