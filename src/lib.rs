//! Core library exports for the OutfitAI wardrobe service.
//!
//! The `data` feature exposes the wardrobe store, the outfit generator and the
//! filter engine together with their SQLite persistence. The `server` feature
//! adds the Actix-web JSON API and shared application state.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
#[cfg(feature = "server")]
pub mod state;
