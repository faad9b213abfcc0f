//! # 태그 모델 정의
//!
//! - `Tag`: `tags` 테이블 한 행
//! - `PostTag`: `post_tags` 관계 행 (게시글 ID, 태그 ID 두 외래키뿐)
//! - `TagList`: 페이지 단위 태그 목록 + 전체 개수
//! - `TagOption`: 선택 UI(태그 칩)에 넘기는 value/label 쌍
//! - `AddTagsRequest`, `CreateRelationRequest`: API 요청 본문

use serde::{Deserialize, Serialize};

/// 태그 엔티티
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub created_at: String,
}

/// 게시글-태그 관계 행
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostTag {
    pub post_id: i64,
    pub tag_id: i64,
}

/// 태그 목록 조회 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagList {
    pub tags: Vec<Tag>,
    pub count: i64,
}

/// 선택된 태그 하나를 화면에 보여줄 때 쓰는 값
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOption {
    pub value: String,
    pub label: String,
}

impl From<&Tag> for TagOption {
    fn from(tag: &Tag) -> Self {
        Self {
            value: tag.id.to_string(),
            label: tag.name.clone(),
        }
    }
}

/// `POST /api/v1/tags` 요청 본문
#[derive(Debug, Deserialize)]
pub struct AddTagsRequest {
    pub names: Vec<String>,
}

/// `POST /api/v1/post-tags` 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateRelationRequest {
    pub post_id: i64,
    pub tag_id: i64,
}
