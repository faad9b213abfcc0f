//! # 데이터 모델 모듈
//!
//! 원격 저장소의 세 테이블에 대응하는 구조체와 목록 조회용 기술자를 정의합니다.
//! - `post`: 게시글(Post)과 커버 이미지 입력
//! - `tag`: 태그(Tag)와 게시글-태그 관계(PostTag)
//! - `query`: 정렬(SortBy)·페이지(Pagination) 기술자

pub mod post;
pub mod query;
pub mod tag;

pub use post::*;
pub use query::*;
pub use tag::*;
