//! Diesel models mirroring the database schema and the stored JSON records.

#[cfg(feature = "server")]
pub mod config;
pub mod entry;
pub mod item;
