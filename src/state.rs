//! 애플리케이션 공유 상태
//!
//! 라우트 핸들러와 훅이 함께 쓰는 의존성 묶음입니다.
//! Axum의 `State` 추출자로 각 핸들러에 주입됩니다.

use crate::{
    client::BlogClient,
    hooks::{Notifier, QueryClient},
};
use std::sync::Arc;

/// `Clone`은 내부 `Arc`/풀 참조만 복제합니다.
#[derive(Clone)]
pub struct AppState {
    pub client: BlogClient,
    pub queries: QueryClient,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(client: BlogClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            queries: QueryClient::new(),
            notifier,
        }
    }

    /// 기본 캐시 대신 주어진 캐시를 씁니다 (상한을 바꿀 때).
    pub fn with_queries(mut self, queries: QueryClient) -> Self {
        self.queries = queries;
        self
    }
}
