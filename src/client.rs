//! # 백엔드 클라이언트
//!
//! 모든 데이터 접근 함수가 받는 핸들입니다. 전역 싱글턴 대신
//! 명시적으로 만들어 주입하므로, 테스트에서는 메모리 DB와
//! 임시 저장소(또는 실패하는 저장소)를 끼워 넣을 수 있습니다.

use crate::storage::ObjectStorage;
use sqlx::SqlitePool;
use std::sync::Arc;

/// DB 연결 풀 + 객체 저장소 + 공개 URL 기준 주소
///
/// `Clone`은 저렴합니다. `SqlitePool`과 `Arc` 모두 내부 참조만 복제합니다.
#[derive(Clone)]
pub struct BlogClient {
    pub pool: SqlitePool,
    pub storage: Arc<dyn ObjectStorage>,
    /// 이미지 공개 URL을 만들 때 앞에 붙는 주소 (예: "http://localhost:3000")
    pub storage_url: String,
}

impl BlogClient {
    pub fn new(
        pool: SqlitePool,
        storage: Arc<dyn ObjectStorage>,
        storage_url: impl Into<String>,
    ) -> Self {
        Self {
            pool,
            storage,
            storage_url: storage_url.into().trim_end_matches('/').to_string(),
        }
    }
}
