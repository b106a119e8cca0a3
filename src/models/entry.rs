use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Diesel model representing the `storage_entries` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::storage_entries)]
#[diesel(primary_key(key))]
pub struct StorageEntry {
    pub key: String,
    pub value: String,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`StorageEntry`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::storage_entries)]
pub struct NewStorageEntry<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub updated_at: NaiveDateTime,
}
