//! 조회 키 모음
//!
//! 변경 훅이 무효화하는 접두사와 조회 훅이 캐시하는 전체 키를 한곳에 둡니다.

use super::QueryKey;
use crate::models::{Pagination, SortBy};

/// 모든 게시글 목록 페이지
pub fn posts() -> QueryKey {
    QueryKey::new(["posts"])
}

pub fn posts_page(sort: Option<&SortBy>, pagination: Pagination) -> QueryKey {
    QueryKey::new([
        "posts".to_string(),
        sort.map_or_else(|| "default".to_string(), |s| s.to_string()),
        pagination.to_string(),
    ])
}

/// slug 단건 조회 전체
pub fn post() -> QueryKey {
    QueryKey::new(["post"])
}

pub fn post_by_slug(slug: &str) -> QueryKey {
    QueryKey::new(["post", slug])
}

/// 태그 목록 (페이지 목록과 전체 목록 모두)
pub fn tags() -> QueryKey {
    QueryKey::new(["tags"])
}

pub fn tags_page(sort: Option<&SortBy>, pagination: Pagination) -> QueryKey {
    QueryKey::new([
        "tags".to_string(),
        sort.map_or_else(|| "default".to_string(), |s| s.to_string()),
        pagination.to_string(),
    ])
}

pub fn all_tags() -> QueryKey {
    QueryKey::new(["tags", "all"])
}

/// 게시글별 관련 태그 전체
pub fn related_tags() -> QueryKey {
    QueryKey::new(["tag"])
}

pub fn related_tags_of(post_id: i64) -> QueryKey {
    QueryKey::new(["tag".to_string(), post_id.to_string()])
}
