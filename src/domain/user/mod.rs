//! User domain
//!
//! Users are the actors of every comment decision. Authentication happens
//! before the domain sees them.

mod entity;

pub use entity::{User, UserId};
