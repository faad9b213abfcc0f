//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 테이블 단위의 SQL 쿼리 함수들입니다. 서비스 계층(services/)이
//! 이 함수들을 순서대로 호출해 하나의 작업(게시글 생성 등)을 구성합니다.
//!
//! 각 하위 모듈:
//! - `posts`: `posts` 테이블
//! - `tags`: `tags` 테이블
//! - `post_tags`: 게시글-태그 관계 테이블

pub mod post_tags;
pub mod posts;
pub mod tags;

pub use post_tags::*;
pub use posts::*;
pub use tags::*;
