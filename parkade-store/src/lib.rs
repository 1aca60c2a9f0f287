pub mod app_config;
pub mod memory_repo;
pub mod redis_repo;
pub mod profile_repo;

pub use memory_repo::InMemoryKvStore;
pub use redis_repo::RedisKvStore;
pub use profile_repo::{MembershipRecord, ProfileRepository, UnitOfWork};
