//! API middleware components

pub mod actor;
pub mod logging;

pub use actor::CurrentActor;
pub use logging::logging_middleware;
