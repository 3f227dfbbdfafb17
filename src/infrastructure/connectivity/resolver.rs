//! Backend Resolver - 候选地址解析与缓存
//!
//! 维护"最近可用"的后端地址：复用前先重新验证，失效则按固定
//! 优先级顺序逐个探测候选。探测严格串行，保证分类结果确定
//! （先遇到的具体错误胜出，而不是哪个探测先返回）

use std::sync::{Arc, RwLock};

use super::error::ConnectError;
use super::probe::HealthProbe;

/// 已解析地址的共享缓存
///
/// 单值、可变、容忍良性竞争（最坏情况多一次冗余探测）；
/// 失败路径触发重新解析，过期自愈
#[derive(Debug, Default)]
pub struct ConnectionCache {
    active_base_url: RwLock<Option<String>>,
}

impl ConnectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.active_base_url
            .read()
            .ok()
            .and_then(|guard| guard.clone())
    }

    pub fn set(&self, url: impl Into<String>) {
        if let Ok(mut guard) = self.active_base_url.write() {
            *guard = Some(url.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.active_base_url.write() {
            *guard = None;
        }
    }
}

/// Backend Resolver
pub struct BackendResolver {
    candidates: Vec<String>,
    cache: ConnectionCache,
    probe: Arc<dyn HealthProbe>,
}

impl BackendResolver {
    pub fn new(candidates: Vec<String>, probe: Arc<dyn HealthProbe>) -> Self {
        Self {
            candidates,
            cache: ConnectionCache::new(),
            probe,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// 使缓存的地址失效（请求层整体解析失败时调用）
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// 解析一个可用的后端地址
    ///
    /// 缓存命中时先重新探测确认；失效或缺失则顺序走一遍候选列表，
    /// 第一个健康的地址被缓存并返回。全部失败时：优先上报第一个
    /// 具体分类（超时/证书/网络），清一色拒绝则上报 NoReachableBackend
    pub async fn resolve(&self) -> Result<String, ConnectError> {
        if let Some(cached) = self.cache.get() {
            match self.probe.probe(&cached).await {
                Ok(()) => {
                    tracing::debug!(url = %cached, "Cached backend still healthy");
                    return Ok(cached);
                }
                Err(err) => {
                    tracing::debug!(url = %cached, error = %err, "Cached backend went stale");
                    self.cache.clear();
                }
            }
        }

        let mut first_specific: Option<ConnectError> = None;

        for candidate in &self.candidates {
            match self.probe.probe(candidate).await {
                Ok(()) => {
                    self.cache.set(candidate.clone());
                    tracing::info!(url = %candidate, "Backend resolved");
                    return Ok(candidate.clone());
                }
                Err(err) => {
                    tracing::debug!(url = %candidate, error = %err, "Candidate probe failed");
                    if first_specific.is_none() && err.is_specific() {
                        first_specific = Some(err);
                    }
                }
            }
        }

        Err(first_specific.unwrap_or_else(|| ConnectError::NoReachableBackend {
            attempted: self.candidates.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 假探针：按地址预设结果并统计每个地址的探测次数
    struct FakeProbe {
        outcomes: HashMap<String, Result<(), ConnectError>>,
        calls: dashmap::DashMap<String, AtomicUsize>,
    }

    impl FakeProbe {
        fn new(outcomes: Vec<(&str, Result<(), ConnectError>)>) -> Self {
            Self {
                outcomes: outcomes
                    .into_iter()
                    .map(|(url, outcome)| (url.to_string(), outcome))
                    .collect(),
                calls: dashmap::DashMap::new(),
            }
        }

        fn call_count(&self, url: &str) -> usize {
            self.calls
                .get(url)
                .map(|c| c.load(Ordering::SeqCst))
                .unwrap_or(0)
        }
    }

    #[async_trait]
    impl HealthProbe for FakeProbe {
        async fn probe(&self, base_url: &str) -> Result<(), ConnectError> {
            self.calls
                .entry(base_url.to_string())
                .or_insert_with(|| AtomicUsize::new(0))
                .fetch_add(1, Ordering::SeqCst);

            self.outcomes
                .get(base_url)
                .cloned()
                .unwrap_or_else(|| panic!("unexpected probe: {}", base_url))
        }
    }

    fn timeout(url: &str) -> ConnectError {
        ConnectError::Timeout {
            url: url.to_string(),
        }
    }

    fn refused(url: &str) -> ConnectError {
        ConnectError::Refused {
            url: url.to_string(),
        }
    }

    fn cert(url: &str) -> ConnectError {
        ConnectError::CertificateTrust {
            url: url.to_string(),
        }
    }

    const A: &str = "https://localhost:8000";
    const B: &str = "https://127.0.0.1:8000";
    const C: &str = "http://localhost:8000";
    const D: &str = "http://127.0.0.1:8000";

    fn all_candidates() -> Vec<String> {
        vec![A, B, C, D].into_iter().map(String::from).collect()
    }

    #[tokio::test]
    async fn test_first_healthy_candidate_wins_and_is_cached() {
        let probe = Arc::new(FakeProbe::new(vec![
            (A, Err(refused(A))),
            (B, Ok(())),
            (C, Ok(())),
            (D, Ok(())),
        ]));
        let resolver = BackendResolver::new(all_candidates(), probe.clone());

        let url = resolver.resolve().await.unwrap();
        assert_eq!(url, B);

        // 第二次解析只重新验证缓存地址，不再走候选列表
        let url = resolver.resolve().await.unwrap();
        assert_eq!(url, B);
        assert_eq!(probe.call_count(A), 1);
        assert_eq!(probe.call_count(B), 2);
        assert_eq!(probe.call_count(C), 0);
        assert_eq!(probe.call_count(D), 0);
    }

    #[tokio::test]
    async fn test_all_timeouts_classified_as_timeout() {
        let probe = Arc::new(FakeProbe::new(vec![
            (A, Err(timeout(A))),
            (B, Err(timeout(B))),
            (C, Err(timeout(C))),
            (D, Err(timeout(D))),
        ]));
        let resolver = BackendResolver::new(all_candidates(), probe);

        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(err, ConnectError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_https_only_opaque_failures_classified_as_certificate() {
        let probe = Arc::new(FakeProbe::new(vec![(A, Err(cert(A))), (B, Err(cert(B)))]));
        let resolver = BackendResolver::new(
            vec![A.to_string(), B.to_string()],
            probe,
        );

        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(err, ConnectError::CertificateTrust { .. }));
    }

    #[tokio::test]
    async fn test_all_refused_reports_attempted_list() {
        let probe = Arc::new(FakeProbe::new(vec![
            (A, Err(refused(A))),
            (B, Err(refused(B))),
            (C, Err(refused(C))),
            (D, Err(refused(D))),
        ]));
        let resolver = BackendResolver::new(all_candidates(), probe);

        match resolver.resolve().await.unwrap_err() {
            ConnectError::NoReachableBackend { attempted } => {
                assert_eq!(attempted.len(), 4);
                assert_eq!(attempted[0], A);
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_first_specific_error_wins_over_later_ones() {
        // A 拒绝、B 超时、C 证书：上报第一个具体错误（B 的超时）
        let probe = Arc::new(FakeProbe::new(vec![
            (A, Err(refused(A))),
            (B, Err(timeout(B))),
            (C, Err(cert(C))),
            (D, Err(refused(D))),
        ]));
        let resolver = BackendResolver::new(all_candidates(), probe);

        let err = resolver.resolve().await.unwrap_err();
        assert!(matches!(err, ConnectError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_stale_cache_falls_through_to_candidate_walk() {
        // 缓存播种为一个已失效的地址：重新验证失败后走候选列表
        let dead = "https://dead:8000";
        let probe = Arc::new(FakeProbe::new(vec![
            (dead, Err(refused(dead))),
            (A, Ok(())),
        ]));
        let resolver = BackendResolver::new(all_candidates(), probe.clone());
        resolver.cache.set(dead);

        let url = resolver.resolve().await.unwrap();
        assert_eq!(url, A);
        assert_eq!(probe.call_count(dead), 1);
        assert_eq!(probe.call_count(A), 1);
    }

    #[tokio::test]
    async fn test_invalidate_clears_cache() {
        let probe = Arc::new(FakeProbe::new(vec![(A, Ok(())), (B, Ok(()))]));
        let resolver = BackendResolver::new(vec![A.to_string(), B.to_string()], probe.clone());

        resolver.resolve().await.unwrap();
        assert_eq!(resolver.cache.get().as_deref(), Some(A));

        resolver.invalidate();
        assert_eq!(resolver.cache.get(), None);
    }
}
