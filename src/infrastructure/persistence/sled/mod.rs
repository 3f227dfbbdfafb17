//! Sled Persistence - 离线项目缓存

mod project_cache;

pub use project_cache::{SledCacheConfig, SledProjectCache};
