pub mod entities;
pub mod repository;
pub mod util;
pub mod role_service;
pub mod errors_service;

pub use entities::*;
pub use role_service::*;
pub use errors_service::*;
