use serde::{Deserialize, Serialize};

/// Style profile stored under the `userTraits` record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserTraits {
    #[serde(default)]
    pub color_preference: String,
    #[serde(default)]
    pub body_shape: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub season: String,
}
