//! # 라우트 핸들러 모듈
//!
//! 관리자 API의 HTTP 핸들러와 라우터 구성입니다.
//!
//! 각 하위 모듈:
//! - `health`: 서버/DB 상태 확인
//! - `posts`: 게시글 CRUD, 관련 태그, 관계 행
//! - `tags`: 태그 조회/추가/삭제

pub mod health;
pub mod posts;
pub mod tags;

pub use health::*;
pub use posts::*;
pub use tags::*;

use crate::{models::*, state::AppState};
use axum::{
    routing::{delete, get, patch},
    Router,
};
use serde::Deserialize;

/// 목록 조회 쿼리 파라미터
///
/// `?sort=name&direction=desc&page=2&per_page=10`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListQuery {
    pub fn sort_by(&self) -> Option<SortBy> {
        self.sort.as_ref().map(|field| SortBy {
            field: field.clone(),
            direction: self.direction.unwrap_or_default(),
        })
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// `/api/v1` 아래에 붙는 API 라우터
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // 게시글
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/slug/{slug}", get(get_post))
        .route("/posts/slug/{slug}/chips", get(post_chips))
        .route("/posts/{id}", patch(edit_post).delete(delete_post))
        .route("/posts/{id}/tags", get(get_related_tags))
        // 게시글-태그 관계
        .route("/post-tags", get(list_post_tags).post(create_relation))
        // 태그
        .route("/tags", get(list_tags).post(add_tags))
        .route("/tags/all", get(list_all_tags))
        .route("/tags/{id}", delete(delete_tag))
        .with_state(state)
}
