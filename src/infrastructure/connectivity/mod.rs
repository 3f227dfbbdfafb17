//! Connectivity - 后端连通性解析
//!
//! 候选地址构造、健康探测、失败分类、地址缓存与解析

mod candidates;
mod error;
mod probe;
mod resolver;

pub use candidates::{candidate_base_urls, is_https, DEFAULT_BACKEND_PORT};
pub use error::{looks_like_certificate_error, looks_like_refused, ConnectError};
pub use probe::{classify_transport_error, HealthProbe, HttpHealthProbe, DEFAULT_PROBE_TIMEOUT_SECS};
pub use resolver::{BackendResolver, ConnectionCache};
