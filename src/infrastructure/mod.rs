//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod connectivity;
pub mod memory;
pub mod persistence;

pub use memory::{InMemoryProjectStore, InMemorySessionManager};
pub use persistence::sled::SledProjectCache;
