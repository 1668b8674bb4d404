pub mod role_repository;
pub mod role_member_repository;
pub mod role_project_repository;
pub mod directory_repository;
#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod models;
pub mod errors;
pub mod traits;

pub use role_repository::RoleRepository;
pub use role_member_repository::RoleMemberRepository;
pub use role_project_repository::RoleProjectRepository;
pub use directory_repository::{DirectoryRepository, SqlProjectAuthorizer};
#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryStore;
pub use errors::RoleRepositoryError;
