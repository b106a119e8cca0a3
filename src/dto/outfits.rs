use serde::Serialize;

use crate::domain::outfit::Outfit;

/// Outfit batch with an optional confirmation message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutfitBatchDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub outfits: Vec<Outfit>,
}
