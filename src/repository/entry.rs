use chrono::Utc;
use diesel::prelude::*;

use crate::models::entry::{NewStorageEntry, StorageEntry};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, StorageReader, StorageWriter};

impl StorageReader for DieselRepository {
    fn get_entry(&self, key: &str) -> RepositoryResult<Option<String>> {
        use crate::schema::storage_entries;

        let mut conn = self.conn()?;

        let entry = storage_entries::table
            .filter(storage_entries::key.eq(key))
            .select(StorageEntry::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(entry.map(|e| e.value))
    }
}

impl StorageWriter for DieselRepository {
    fn put_entry(&self, key: &str, value: &str) -> RepositoryResult<usize> {
        use crate::schema::storage_entries;

        let mut conn = self.conn()?;
        let entry = NewStorageEntry {
            key,
            value,
            updated_at: Utc::now().naive_utc(),
        };

        let affected = diesel::replace_into(storage_entries::table)
            .values(&entry)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
