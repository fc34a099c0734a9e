//! File-backed persistence.
//!
//! Layout under the data directory:
//! ```text
//! data/
//!   users/
//!     <owner>/
//!       environments/<id>.json
//!       templates/<id>.json
//! ```

mod environment_repository;
mod file_system;
mod record_store;
mod template_repository;

pub use environment_repository::FileEnvironmentRepository;
pub use file_system::TokioFileSystem;
pub use template_repository::FileTemplateRepository;
