pub mod errors;
pub mod filters;
pub mod matcher;
pub mod traits;
pub mod wardrobe;

pub use errors::{ServiceError, ServiceResult};
