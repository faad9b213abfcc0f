//! # 서비스 계층
//!
//! DB 쿼리와 객체 저장소 호출을 묶어 하나의 관리자 작업으로 만듭니다.
//! 실패는 모두 작업 이름이 붙은 고정 메시지(`Failure`)로 올라갑니다.
//!
//! - `posts`: 게시글 조회/생성/수정/삭제, 관계 행 조회/생성
//! - `tags`: 태그 조회/추가/삭제, 게시글의 관련 태그 조회

pub mod posts;
pub mod tags;

pub use posts::*;
pub use tags::*;
