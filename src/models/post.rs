//! # 게시글 모델 정의
//!
//! - `Post`: DB의 `posts` 테이블 한 행
//! - `PostWithTags`: 관련 태그를 붙인 게시글 (목록/단건 조회 응답)
//! - `CoverImage`: 커버 이미지가 "이미 업로드된 URL"인지 "올릴 파일"인지 구분하는 태그드 variant
//! - `NewPost`: 게시글 생성/수정 입력
//! - `PostList`: 페이지 단위 목록 + 전체 개수

use super::Tag;
use serde::{Deserialize, Serialize};

/// 게시글 엔티티. `posts` 테이블 한 행에 대응합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub body: String,
    /// 저장된 뒤에는 항상 공개 URL입니다.
    pub cover_image: String,
    pub created_at: String,
    pub modified_at: Option<String>,
}

/// 관련 태그가 붙은 게시글
///
/// `#[serde(flatten)]`으로 JSON에서는 게시글 필드 옆에 `tags`가 나란히 나옵니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithTags {
    #[serde(flatten)]
    pub post: Post,
    pub tags: Vec<Tag>,
}

impl PostWithTags {
    pub fn tag_ids(&self) -> Vec<i64> {
        self.tags.iter().map(|t| t.id).collect()
    }
}

/// 커버 이미지 입력
///
/// 폼 경계에서 한 번만 판별하고, 이후 로직은 이 variant로만 분기합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverImage {
    /// 이미 저장소에 있는 이미지의 URL. 업로드를 건너뜁니다.
    Uploaded(String),
    /// 아직 올리지 않은 원본 파일
    PendingUpload { file_name: String, bytes: Vec<u8> },
}

impl CoverImage {
    pub fn pending(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        CoverImage::PendingUpload {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// 게시글 생성/수정 입력
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub body: String,
    pub cover_image: CoverImage,
}

impl NewPost {
    /// slug가 비어 있으면 제목으로부터 만들어 씁니다.
    pub fn effective_slug(&self) -> String {
        if self.slug.trim().is_empty() {
            slug::slugify(&self.title)
        } else {
            self.slug.trim().to_string()
        }
    }
}

/// 게시글 목록 조회 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostList {
    pub posts: Vec<PostWithTags>,
    /// 범위와 무관한 전체 게시글 수
    pub count: i64,
}
