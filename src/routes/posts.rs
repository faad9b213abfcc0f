//! # 게시글(Post) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/posts | `list_posts` | 게시글 목록 (정렬/페이지) |
//! | POST | /api/v1/posts | `create_post` | 새 게시글 (multipart) |
//! | GET | /api/v1/posts/slug/{slug} | `get_post` | slug로 단건 조회 |
//! | GET | /api/v1/posts/slug/{slug}/chips | `post_chips` | 관련 태그 칩 HTML |
//! | PATCH | /api/v1/posts/{id} | `edit_post` | 게시글 수정 (multipart) |
//! | DELETE | /api/v1/posts/{id} | `delete_post` | 게시글 삭제 |
//! | GET | /api/v1/posts/{id}/tags | `get_related_tags` | 관련 태그 |
//! | GET | /api/v1/post-tags | `list_post_tags` | 모든 관계 행 |
//! | POST | /api/v1/post-tags | `create_relation` | 관계 행 하나 추가 |
//!
//! 쓰기 핸들러는 변경 훅(`Mutation`)을 거치므로, 성공하면 관련 조회 캐시가
//! 무효화되고 응답 본문에 성공 알림(`toast`)이 담깁니다.

use crate::{
    error::AppError,
    hooks::{self, Toast},
    models::*,
    routes::ListQuery,
    services,
    state::AppState,
    ui::{render_chips, TagChip},
};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};

/// multipart 게시글 폼을 파싱한 결과
#[derive(Debug)]
pub struct PostForm {
    pub slug: String,
    pub title: String,
    pub body: String,
    /// 파일도 URL도 보내지 않았으면 None
    pub cover_image: Option<CoverImage>,
    pub tag_ids: Vec<i64>,
}

impl PostForm {
    /// 새 게시글 입력. 커버 이미지가 반드시 있어야 합니다.
    pub fn into_new_post(self) -> Result<(NewPost, Vec<i64>), AppError> {
        let cover_image = self.cover_image.ok_or_else(|| {
            AppError::BadRequest("cover_image or cover_image_url is required".to_string())
        })?;
        Ok((
            NewPost {
                slug: self.slug,
                title: self.title,
                body: self.body,
                cover_image,
            },
            self.tag_ids,
        ))
    }

    /// 수정 입력. 커버 이미지가 없으면 저장된 것을 그대로 둡니다.
    pub fn into_edit(self) -> (NewPost, Vec<i64>) {
        let cover_image = self
            .cover_image
            .unwrap_or_else(|| CoverImage::Uploaded(String::new()));
        (
            NewPost {
                slug: self.slug,
                title: self.title,
                body: self.body,
                cover_image,
            },
            self.tag_ids,
        )
    }
}

fn bad_request(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(e.to_string())
}

/// `"1, 2,3"` → `[1, 2, 3]`. 빈 조각은 건너뜁니다.
pub fn parse_tag_ids(raw: &str) -> Result<Vec<i64>, AppError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|_| AppError::BadRequest(format!("invalid tag id: {}", part)))
        })
        .collect()
}

/// 게시글 폼을 읽습니다.
///
/// 필드: `slug`, `title`(필수), `body`, `cover_image`(파일), `cover_image_url`(텍스트),
/// `tag_ids`(여러 번 보내거나 쉼표로 구분).
///
/// 파일을 고르지 않은 브라우저는 빈 `cover_image` 파트를 보내므로, 비어 있는 파일과
/// 빈 URL은 보내지 않은 것으로 봅니다. 둘 다 있으면 파일이 우선입니다.
pub async fn read_post_form(mut multipart: Multipart) -> Result<PostForm, AppError> {
    let mut slug = String::new();
    let mut title = None;
    let mut body = String::new();
    let mut upload = None;
    let mut cover_url = None;
    let mut tag_ids = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "slug" => slug = field.text().await.map_err(bad_request)?,
            "title" => title = Some(field.text().await.map_err(bad_request)?),
            "body" => body = field.text().await.map_err(bad_request)?,
            "cover_image" => {
                let file_name = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| "cover".to_string());
                let bytes = field.bytes().await.map_err(bad_request)?;
                if bytes.is_empty() {
                    tracing::debug!("Ignoring empty cover_image part");
                } else {
                    upload = Some(CoverImage::pending(file_name, bytes.to_vec()));
                }
            }
            "cover_image_url" => {
                let url = field.text().await.map_err(bad_request)?;
                if !url.trim().is_empty() {
                    cover_url = Some(CoverImage::Uploaded(url.trim().to_string()));
                }
            }
            "tag_ids" => {
                let raw = field.text().await.map_err(bad_request)?;
                tag_ids.extend(parse_tag_ids(&raw)?);
            }
            _ => tracing::debug!(field = %name, "Ignoring unknown form field"),
        }
    }

    let title = title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("title is required".to_string()))?;

    Ok(PostForm {
        slug,
        title,
        body,
        cover_image: upload.or(cover_url),
        tag_ids,
    })
}

/// `GET /posts?sort=title&direction=desc&page=2&per_page=10` → `{ "posts": [...], "count": n }`
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PostList>, AppError> {
    let sort = query.sort_by();
    let posts = hooks::use_posts(&state, sort.as_ref(), query.pagination()).await?;
    Ok(Json(posts))
}

/// `GET /posts/slug/{slug}` → 관련 태그가 붙은 게시글
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostWithTags>, AppError> {
    let post = hooks::use_post(&state, &slug).await?;
    Ok(Json(post))
}

/// `GET /posts/slug/{slug}/chips` → 게시글의 태그 칩 HTML 조각
pub async fn post_chips(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let post = hooks::use_post(&state, &slug).await?;
    let chips: Vec<TagChip> = post
        .tags
        .iter()
        .map(|tag| TagChip::new(TagOption::from(tag)))
        .collect();

    Ok(Html(format!(
        r#"<div class="tag-chips">{}</div>"#,
        render_chips(&chips)
    )))
}

/// `POST /posts` (multipart) → `201 Created` + `{ "post": ..., "toast": ... }`
pub async fn create_post(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (new_post, tag_ids) = read_post_form(multipart).await?.into_new_post()?;
    let mutation = hooks::use_create_post(&state);
    let post = mutation
        .mutate(services::create_post(&state.client, new_post, &tag_ids))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "post": post, "toast": Toast::success(mutation.success_message()) })),
    ))
}

/// `PATCH /posts/{id}` (multipart) → `{ "post": ..., "toast": ... }`
///
/// 태그 관계는 보낸 `tag_ids`로 통째로 교체됩니다. 커버 이미지를 보내지 않으면 그대로 둡니다.
pub async fn edit_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let (new_post, tag_ids) = read_post_form(multipart).await?.into_edit();
    let mutation = hooks::use_edit_post(&state);
    let post = mutation
        .mutate(services::edit_post(&state.client, new_post, id, &tag_ids))
        .await?;

    Ok(Json(
        json!({ "post": post, "toast": Toast::success(mutation.success_message()) }),
    ))
}

/// `DELETE /posts/{id}` → `{ "toast": ... }`
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let mutation = hooks::use_delete_post(&state);
    mutation
        .mutate(services::delete_post(&state.client, id))
        .await?;

    Ok(Json(json!({ "toast": Toast::success(mutation.success_message()) })))
}

/// `GET /posts/{id}/tags` → `{ "tags": [...] }`
pub async fn get_related_tags(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let tags = hooks::use_tag(&state, id).await?;
    Ok(Json(json!({ "tags": tags })))
}

/// `GET /post-tags` → `{ "post_tags": [...] }`
pub async fn list_post_tags(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let relations = services::fetch_post_tags(&state.client).await?;
    Ok(Json(json!({ "post_tags": relations })))
}

/// `POST /post-tags` + `{ "post_id": 1, "tag_id": 2 }` → `201 Created`
pub async fn create_relation(
    State(state): State<AppState>,
    Json(req): Json<CreateRelationRequest>,
) -> Result<StatusCode, AppError> {
    services::create_relation(&state.client, req.post_id, req.tag_id).await?;
    // 목록/단건/관련 태그 조회가 모두 이 관계를 보여주므로 함께 무효화합니다.
    for prefix in [
        hooks::keys::posts(),
        hooks::keys::post(),
        hooks::keys::related_tags_of(req.post_id),
    ] {
        state.queries.invalidate_queries(&prefix);
    }
    Ok(StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_ids_accept_commas_and_spaces() {
        assert_eq!(parse_tag_ids("1, 2,,3 ").unwrap(), vec![1, 2, 3]);
        assert!(parse_tag_ids("").unwrap().is_empty());
        assert!(matches!(parse_tag_ids("1,x"), Err(AppError::BadRequest(_))));
    }

    fn form(cover_image: Option<CoverImage>) -> PostForm {
        PostForm {
            slug: "s".to_string(),
            title: "T".to_string(),
            body: String::new(),
            cover_image,
            tag_ids: vec![1],
        }
    }

    #[test]
    fn create_requires_a_cover_but_edit_keeps_the_stored_one() {
        assert!(matches!(
            form(None).into_new_post(),
            Err(AppError::BadRequest(_))
        ));

        let (edit, tag_ids) = form(None).into_edit();
        assert_eq!(edit.cover_image, CoverImage::Uploaded(String::new()));
        assert_eq!(tag_ids, vec![1]);
    }
}
