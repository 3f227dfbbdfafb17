//! 候选后端地址
//!
//! 回环主机名 × 协议 × 固定端口，HTTPS 变体优先
//! （后端以自签名证书提供 TLS，未接受证书是最常见的失败原因）

/// 默认后端端口
pub const DEFAULT_BACKEND_PORT: u16 = 8000;

const SCHEMES: &[&str] = &["https", "http"];
const HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// 构造候选地址列表（固定优先级顺序）
pub fn candidate_base_urls(port: u16) -> Vec<String> {
    let mut urls = Vec::with_capacity(SCHEMES.len() * HOSTS.len());
    for scheme in SCHEMES {
        for host in HOSTS {
            urls.push(format!("{}://{}:{}", scheme, host, port));
        }
    }
    urls
}

/// 候选地址是否走 TLS
pub fn is_https(base_url: &str) -> bool {
    base_url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_candidates_https_first() {
        let urls = candidate_base_urls(8000);
        assert_eq!(
            urls,
            vec![
                "https://localhost:8000",
                "https://127.0.0.1:8000",
                "http://localhost:8000",
                "http://127.0.0.1:8000",
            ]
        );
    }

    #[test]
    fn test_is_https() {
        assert!(is_https("https://localhost:8000"));
        assert!(!is_https("http://localhost:8000"));
    }
}
