//! Backend Adapter - 远程 Ex3 后端客户端

mod dto;
mod http_backend_client;

pub use http_backend_client::{
    HttpBackendClient, HttpBackendClientConfig, DEFAULT_REQUEST_TIMEOUT_SECS,
};
