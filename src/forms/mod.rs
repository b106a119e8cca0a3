pub mod items;
pub mod traits;
#[cfg(feature = "server")]
pub mod upload;
