//! Domain entities and value objects.

pub mod item;
pub mod outfit;
pub mod traits;
pub mod types;
