//! Namespace domain module
//!
//! A namespace belongs to exactly one team and carries the visibility tier
//! every repository inside it inherits.

mod entity;
mod visibility;

pub use entity::{Namespace, NamespaceId};
pub use visibility::{UnknownVisibility, Visibility};
