//! 변경(mutation) 훅
//!
//! 쓰기 작업 하나를 감싸서 세 가지를 더합니다.
//! - 호출이 진행 중인 동안 `is_pending()`이 true
//! - 성공하면 성공 알림을 띄우고 의존하는 조회 키를 무효화
//! - 실패하면 에러 메시지를 담은 알림을 띄우고 에러를 그대로 반환
//!
//! 재시도, 백오프, 낙관적 업데이트는 하지 않습니다.

use super::{Notifier, QueryClient, QueryKey, Toast};
use crate::error::AppError;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct Mutation {
    success_message: String,
    invalidates: Vec<QueryKey>,
    queries: QueryClient,
    notifier: Arc<dyn Notifier>,
    in_flight: Arc<AtomicUsize>,
}

/// 진행 중 카운터를 올렸다가 drop될 때 내립니다 (패닉/취소 시에도).
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Mutation {
    pub fn new(
        queries: QueryClient,
        notifier: Arc<dyn Notifier>,
        success_message: impl Into<String>,
    ) -> Self {
        Self {
            success_message: success_message.into(),
            invalidates: Vec::new(),
            queries,
            notifier,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 성공 시 무효화할 키 접두사를 추가합니다.
    pub fn invalidates(mut self, prefix: QueryKey) -> Self {
        self.invalidates.push(prefix);
        self
    }

    pub fn success_message(&self) -> &str {
        &self.success_message
    }

    pub fn invalidated_keys(&self) -> &[QueryKey] {
        &self.invalidates
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// 쓰기 작업을 실행합니다.
    pub async fn mutate<T, Fut>(&self, call: Fut) -> Result<T, AppError>
    where
        Fut: Future<Output = Result<T, AppError>>,
    {
        let _in_flight = InFlight::enter(&self.in_flight);

        match call.await {
            Ok(value) => {
                self.notifier.notify(Toast::success(self.success_message.clone()));
                for prefix in &self.invalidates {
                    self.queries.invalidate_queries(prefix);
                }
                Ok(value)
            }
            Err(err) => {
                self.notifier.notify(Toast::error(err.to_string()));
                Err(err)
            }
        }
    }
}
