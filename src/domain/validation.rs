//! Identifier validation shared by every entity ID type

use thiserror::Error;

/// Errors that can occur while validating an identifier
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IdValidationError {
    #[error("{0} ID cannot be empty")]
    Empty(&'static str),

    #[error("{0} ID exceeds maximum length of {1} characters")]
    TooLong(&'static str, usize),

    #[error("{0} ID must start with a letter or number")]
    InvalidStart(&'static str),

    #[error("{0} ID must end with a letter or number")]
    InvalidEnd(&'static str),

    #[error("{0} ID contains invalid character: '{1}'. Only alphanumeric characters and hyphens are allowed")]
    InvalidCharacter(&'static str, char),

    #[error("{0} ID cannot contain consecutive hyphens")]
    ConsecutiveHyphens(&'static str),
}

const MAX_ID_LENGTH: usize = 50;

/// Validate an identifier of the given kind (`"User"`, `"Team"`, ...)
///
/// Rules:
/// - Cannot be empty
/// - Maximum 50 characters
/// - Only ASCII alphanumeric characters and hyphens
/// - Must start and end with alphanumeric
/// - No consecutive hyphens
pub fn validate_identifier(kind: &'static str, id: &str) -> Result<(), IdValidationError> {
    if id.is_empty() {
        return Err(IdValidationError::Empty(kind));
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(IdValidationError::TooLong(kind, MAX_ID_LENGTH));
    }

    if id.starts_with('-') {
        return Err(IdValidationError::InvalidStart(kind));
    }

    if id.ends_with('-') {
        return Err(IdValidationError::InvalidEnd(kind));
    }

    let mut prev_hyphen = false;

    for c in id.chars() {
        if c == '-' {
            if prev_hyphen {
                return Err(IdValidationError::ConsecutiveHyphens(kind));
            }
            prev_hyphen = true;
        } else if c.is_ascii_alphanumeric() {
            prev_hyphen = false;
        } else {
            return Err(IdValidationError::InvalidCharacter(kind, c));
        }
    }

    Ok(())
}

/// Declares a validated string identifier newtype with serde, `Display` and
/// `StorageKey` support.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier after validation
            pub fn new(
                id: impl Into<String>,
            ) -> Result<Self, $crate::domain::validation::IdValidationError> {
                let id = id.into();
                $crate::domain::validation::validate_identifier($kind, &id)?;
                Ok(Self(id))
            }

            /// Get the inner string value
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::validation::IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl $crate::domain::storage::StorageKey for $name {
            fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

pub(crate) use string_id;
