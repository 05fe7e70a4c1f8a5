//! Comment attribute validation

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Maximum body length in characters
pub const MAX_COMMENT_BODY_LENGTH: u64 = 65535;

/// Attributes a client submits when creating a comment
///
/// Unknown attributes are ignored, so a payload without `body` deserializes
/// fine and is rejected here instead.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentAttributes {
    #[serde(default)]
    #[validate(
        required(message = "can't be blank"),
        length(min = 1, max = MAX_COMMENT_BODY_LENGTH, message = "must be between 1 and 65535 characters")
    )]
    pub body: Option<String>,
}

impl CommentAttributes {
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
        }
    }
}

/// A single failed attribute check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Validate comment attributes, returning the trimmed body on success
pub fn validate_comment(attributes: &CommentAttributes) -> Result<String, Vec<FieldError>> {
    let normalized = CommentAttributes {
        body: attributes.body.as_deref().map(|b| b.trim().to_string()),
    };

    match normalized.validate() {
        Ok(()) => Ok(normalized.body.unwrap_or_default()),
        Err(errors) => Err(field_errors(&errors)),
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut result: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                code: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();

    result.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    result
}
