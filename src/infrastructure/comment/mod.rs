//! Comment infrastructure implementations

mod repository;
mod service;

pub use repository::StorageCommentRepository;
pub use service::CommentService;
