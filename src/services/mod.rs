// Service exports
pub mod cache;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod store;

pub use cache::{CacheKey, MatchCache};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use repository::MatchRepository;
pub use store::{MockProfileStore, ProfileStore, StoreError};
