//! Repository domain module

mod entity;

pub use entity::{Repository, RepositoryId};
