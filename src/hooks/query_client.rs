//! 조회 결과 캐시와 무효화
//!
//! 조회 훅은 결과를 `QueryKey` 아래에 보관하고, 변경 훅은 성공한 뒤
//! 관련 키 접두사를 무효화(stale 표시)합니다. 무효화된 항목은 다음 조회 때
//! 다시 가져옵니다. 만료 시간은 없고, 항목 수가 상한을 넘으면 낡은 항목부터
//! 덜어냅니다.

use crate::error::AppError;
use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 캐시 항목 수 기본 상한
pub const DEFAULT_MAX_ENTRIES: usize = 1_000;

/// 세그먼트 목록으로 된 조회 키. 예: `["tag", "3"]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self(segments.into_iter().map(|s| s.to_string()).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// `prefix`의 세그먼트가 이 키의 앞부분과 모두 같으면 true
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    stale: bool,
}

/// 조회 결과 캐시
///
/// `Clone`하면 같은 캐시를 공유합니다.
#[derive(Clone)]
pub struct QueryClient {
    entries: Arc<DashMap<QueryKey, Entry>>,
    /// 무효화가 일어날 때마다 1씩 증가합니다.
    epoch: Arc<AtomicU64>,
    max_entries: usize,
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            epoch: Arc::new(AtomicU64::new(0)),
            max_entries: max_entries.max(1),
        }
    }

    /// 신선한 캐시가 있으면 그 값을, 없거나 무효화됐으면 `fetcher`를 실행해 저장한 값을 반환합니다.
    ///
    /// `fetcher`가 실패하면 캐시는 건드리지 않고 에러를 그대로 돌려줍니다.
    /// 조회 도중 무효화가 있었다면 결과는 반환하되 낡은 항목으로 저장합니다.
    pub async fn fetch_query<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, AppError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Some(value) = self.fresh_data::<T>(&key) {
            tracing::trace!(%key, "Query cache hit");
            return Ok(value);
        }

        let started_at = self.epoch.load(Ordering::SeqCst);
        tracing::debug!(%key, "Fetching query");
        let value = fetcher().await?;

        let stale = self.epoch.load(Ordering::SeqCst) != started_at;
        if stale {
            tracing::debug!(%key, "Invalidated while fetching, storing as stale");
        }
        self.store(key, Arc::new(value.clone()), stale);
        Ok(value)
    }

    /// 무효화 여부와 관계없이 캐시된 값을 꺼냅니다.
    pub fn get_query_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.entries
            .get(key)
            .and_then(|entry| entry.value.downcast_ref::<T>().cloned())
    }

    pub fn set_query_data<T: Send + Sync + 'static>(&self, key: QueryKey, value: T) {
        self.store(key, Arc::new(value), false);
    }

    /// `prefix`로 시작하는 모든 키를 무효화하고, 무효화한 개수를 반환합니다.
    pub fn invalidate_queries(&self, prefix: &QueryKey) -> usize {
        // 진행 중인 조회가 끝나도 신선한 값으로 저장되지 않게 먼저 올립니다.
        self.epoch.fetch_add(1, Ordering::SeqCst);

        let mut invalidated = 0;
        for mut entry in self.entries.iter_mut() {
            if entry.key().starts_with(prefix) && !entry.stale {
                entry.stale = true;
                invalidated += 1;
            }
        }
        tracing::debug!(%prefix, invalidated, "Invalidated queries");
        invalidated
    }

    /// 캐시에 없거나 무효화된 키면 true
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries.get(key).map_or(true, |entry| entry.stale)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fresh_data<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        self.entries
            .get(key)
            .filter(|entry| !entry.stale)
            .and_then(|entry| entry.value.downcast_ref::<T>().cloned())
    }

    fn store(&self, key: QueryKey, value: Arc<dyn Any + Send + Sync>, stale: bool) {
        if !self.entries.contains_key(&key) {
            self.enforce_limit();
        }
        self.entries.insert(key, Entry { value, stale });
    }

    /// 상한에 닿았으면 낡은 항목을 먼저 지우고, 그래도 가득 차 있으면 10%를 덜어냅니다.
    fn enforce_limit(&self) {
        if self.entries.len() < self.max_entries {
            return;
        }

        self.entries.retain(|_, entry| !entry.stale);
        if self.entries.len() < self.max_entries {
            return;
        }

        let evict_count = (self.entries.len() / 10).max(1);
        let victims: Vec<QueryKey> = self
            .entries
            .iter()
            .take(evict_count)
            .map(|entry| entry.key().clone())
            .collect();
        for key in &victims {
            self.entries.remove(key);
        }
        tracing::warn!(
            evicted = victims.len(),
            max_entries = self.max_entries,
            "Query cache full, evicting entries"
        );
    }
}
