//! Repository inventory: record model and the session cache

pub mod cache;
pub mod model;

pub use cache::{CacheState, InventoryCache};
pub use model::{RepositoryDetail, RepositoryRecord, Visibility};
