//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and closed vocabularies are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A value is not part of a closed vocabulary.
    #[error("unknown {field}: {value}")]
    UnknownVariant { field: &'static str, value: String },
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

/// Macro for closed string vocabularies stored in lowercase.
macro_rules! vocabulary_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:expr, { $($variant:ident => $text:expr),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// String representation used in persistence.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                let normalized = value.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(TypeConstraintError::UnknownVariant {
                        field: $field,
                        value: value.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_from(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

non_empty_string_newtype!(ItemId, "Unique identifier of a clothing item.", "item id");
non_empty_string_newtype!(OutfitId, "Identifier of a generated outfit.", "outfit id");
non_empty_string_newtype!(
    ImageRef,
    "Reference to image data: an embedded data URI or a path.",
    "image"
);
non_empty_string_newtype!(ItemName, "Human-readable item label.", "item name");
non_empty_string_newtype!(
    ItemDescription,
    "Free-text item description.",
    "description"
);
non_empty_string_newtype!(Tag, "Free-text tag attached to an item.", "tag");

vocabulary_enum!(
    /// Closed set of wardrobe categories.
    Category, "category", {
        Tops => "tops",
        Bottoms => "bottoms",
        Outerwear => "outerwear",
        Dresses => "dresses",
        Shoes => "shoes",
        Accessories => "accessories",
    }
);

vocabulary_enum!(
    /// Fixed colour palette an item can be labelled with.
    Color, "color", {
        Black => "black",
        White => "white",
        Gray => "gray",
        Navy => "navy",
        Blue => "blue",
        Red => "red",
        Green => "green",
        Yellow => "yellow",
        Orange => "orange",
        Pink => "pink",
        Purple => "purple",
        Brown => "brown",
        Beige => "beige",
    }
);

vocabulary_enum!(
    /// Occasion label assigned to generated outfits.
    Occasion, "occasion", {
        Casual => "casual",
        Formal => "formal",
    }
);

/// Trims tags, drops empty ones and removes duplicates keeping the first
/// occurrence.
pub fn normalize_tags<I, S>(raw: I) -> Vec<Tag>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tags: Vec<Tag> = Vec::new();
    for value in raw {
        let Ok(tag) = Tag::new(value) else {
            continue;
        };
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
