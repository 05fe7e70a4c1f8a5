//! Namespace visibility tiers

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visibility tier of a namespace
///
/// Every repository inherits the tier of the namespace it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Anyone may comment, including anonymous visitors
    #[serde(alias = "visibility_public")]
    Public,
    /// Any logged-in user may comment
    #[serde(alias = "visibility_protected")]
    Protected,
    /// Only owners of the namespace's team may comment
    #[serde(alias = "visibility_private")]
    Private,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Self::Public, Self::Protected, Self::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown visibility tier
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Unknown visibility '{0}'. Expected one of: public, protected, private")]
pub struct UnknownVisibility(pub String);

impl std::str::FromStr for Visibility {
    type Err = UnknownVisibility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" | "visibility_public" => Ok(Self::Public),
            "protected" | "visibility_protected" => Ok(Self::Protected),
            "private" | "visibility_private" => Ok(Self::Private),
            _ => Err(UnknownVisibility(s.to_string())),
        }
    }
}
