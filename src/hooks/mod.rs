//! # 훅(hooks) 계층
//!
//! 서비스 함수를 관리자 화면이 쓰기 좋은 형태로 감쌉니다.
//! - 조회 훅(`use_posts`, `use_tag` 등): `QueryClient` 캐시를 거쳐 조회
//! - 변경 훅(`use_create_post` 등): `Mutation`으로 진행 상태·알림·무효화 처리
//!
//! 하위 모듈:
//! - `query_client`: 조회 키와 캐시
//! - `mutation`: 변경 훅 공통 동작
//! - `toast`: 알림 타입과 `Notifier` 구현
//! - `keys`: 조회 키 모음
//! - `posts`, `tags`: 도메인별 훅

pub mod keys;
pub mod mutation;
pub mod posts;
pub mod query_client;
pub mod tags;
pub mod toast;

pub use mutation::Mutation;
pub use posts::*;
pub use query_client::{QueryClient, QueryKey};
pub use tags::*;
pub use toast::{Notifier, Toast, ToastKind, ToastLog, TracingNotifier};
