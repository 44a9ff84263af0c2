//! Repository structs, one per collection.

mod project_repo;

pub use project_repo::ProjectRepo;
