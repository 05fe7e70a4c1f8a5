//! Infrastructure layer - storage, services, authentication and startup wiring

pub mod auth;
pub mod catalog;
pub mod comment;
pub mod logging;
pub mod seed;
pub mod storage;
