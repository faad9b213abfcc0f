//! # 게시글 서비스
//!
//! 게시글 목록/단건 조회와 생성/수정/삭제를 구성합니다.
//! 각 작업은 DB 쿼리와 이미지 업로드를 정해진 순서로 `await`할 뿐,
//! 트랜잭션이나 롤백은 없습니다. 중간 단계가 실패하면 앞 단계의
//! 결과(예: 이미 삽입된 게시글 행)는 그대로 남습니다.

use crate::{
    client::BlogClient,
    db,
    error::{AppError, Failure, OrFail},
    models::*,
    services::tags::fetch_related_tags,
    storage::{self, BLOG_BUCKET},
};
use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;

/// 업로드 대기 중인 커버 이미지: 객체 이름, 공개 URL, 원본 바이트
#[derive(Debug)]
struct PendingImage {
    name: String,
    url: String,
    bytes: Vec<u8>,
}

impl PendingImage {
    fn new(storage_url: &str, file_name: &str, bytes: Vec<u8>) -> Self {
        let name = storage::image_name(file_name);
        let url = storage::public_image_url(storage_url, &name);
        Self { name, url, bytes }
    }

    async fn upload(self, client: &BlogClient) -> Result<(), AppError> {
        client
            .storage
            .upload(BLOG_BUCKET, &self.name, &self.bytes)
            .await
            .or_fail(Failure::ImageNotUploaded)
    }
}

/// 게시글 목록을 관련 태그와 함께 조회합니다.
///
/// 1. `posts`에서 정렬/범위를 적용해 조회하고 전체 개수를 셉니다.
/// 2. 조회된 게시글들의 관계 행을 태그와 JOIN해 가져옵니다.
/// 3. 게시글 ID별로 묶어 각 게시글에 붙입니다.
///
/// 두 조회 중 하나라도 실패하면 "Posts could not be loaded".
pub async fn fetch_posts(
    client: &BlogClient,
    sort: Option<&SortBy>,
    pagination: Pagination,
) -> Result<PostList, AppError> {
    let (posts, count) = db::select_posts(&client.pool, sort, pagination.range())
        .await
        .or_fail(Failure::PostsNotLoaded)?;

    let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    let tagged = db::select_tags_for_posts(&client.pool, &post_ids)
        .await
        .or_fail(Failure::PostsNotLoaded)?;

    let mut tags_by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
    for (post_id, tag) in tagged {
        tags_by_post.entry(post_id).or_default().push(tag);
    }

    let posts = posts
        .into_iter()
        .map(|post| {
            let tags = tags_by_post.remove(&post.id).unwrap_or_default();
            PostWithTags { post, tags }
        })
        .collect();

    Ok(PostList { posts, count })
}

/// slug로 게시글 하나를 관련 태그와 함께 조회합니다.
///
/// 결과가 0건이거나 여러 건이면 "Post could not be loaded".
pub async fn fetch_post(client: &BlogClient, slug: &str) -> Result<PostWithTags, AppError> {
    let mut posts = db::select_posts_by_slug(&client.pool, slug)
        .await
        .or_fail(Failure::PostNotLoaded)?;

    if posts.len() != 1 {
        tracing::error!(slug, rows = posts.len(), "Expected exactly one post for slug");
        return Err(Failure::PostNotLoaded.into());
    }
    let post = posts.remove(0);

    let tags = fetch_related_tags(client, post.id).await?;
    Ok(PostWithTags { post, tags })
}

/// 새 게시글을 만듭니다.
///
/// 순서: 행 삽입 → 이미지 업로드 → 관계 행 삽입.
/// - `PendingUpload`: 무작위 객체 이름과 공개 URL을 만들어 URL을 넣은 채로 삽입한 뒤 업로드합니다.
///   업로드가 실패해도 이미 삽입된 행은 지워지지 않습니다.
/// - `Uploaded(url)`: 그 URL로 삽입하고 업로드는 건너뜁니다.
pub async fn create_post(
    client: &BlogClient,
    new_post: NewPost,
    tag_ids: &[i64],
) -> Result<Post, AppError> {
    let slug = new_post.effective_slug();
    let (cover_url, pending) = match new_post.cover_image {
        CoverImage::Uploaded(url) => (url, None),
        CoverImage::PendingUpload { file_name, bytes } => {
            let image = PendingImage::new(&client.storage_url, &file_name, bytes);
            (image.url.clone(), Some(image))
        }
    };

    let post = db::insert_post(&client.pool, &slug, &new_post.title, &new_post.body, &cover_url)
        .await
        .or_fail(Failure::PostNotCreated)?;

    if let Some(image) = pending {
        image.upload(client).await?;
    }

    db::insert_post_tags(&client.pool, post.id, tag_ids)
        .await
        .or_fail(Failure::PostNotCreated)?;

    tracing::info!(post_id = post.id, slug = %post.slug, tags = tag_ids.len(), "Created post");
    Ok(post)
}

/// 게시글을 수정하고 태그 관계를 통째로 교체합니다.
///
/// 순서: 행 수정(`modified_at` 갱신) → 새 이미지 업로드(있으면) →
/// 기존 관계 행 전부 삭제 → 새 관계 행 삽입.
///
/// `Uploaded`이면 저장된 커버 이미지는 바꾸지 않습니다.
/// 같은 게시글을 두 사람이 동시에 수정하면 마지막 삭제-삽입이 이깁니다.
pub async fn edit_post(
    client: &BlogClient,
    new_post: NewPost,
    post_id: i64,
    tag_ids: &[i64],
) -> Result<Post, AppError> {
    let slug = new_post.effective_slug();
    let pending = match new_post.cover_image {
        CoverImage::Uploaded(_) => None,
        CoverImage::PendingUpload { file_name, bytes } => {
            Some(PendingImage::new(&client.storage_url, &file_name, bytes))
        }
    };
    let modified_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let mut edited = db::update_post(
        &client.pool,
        post_id,
        &slug,
        &new_post.title,
        &new_post.body,
        pending.as_ref().map(|image| image.url.as_str()),
        &modified_at,
    )
    .await
    .or_fail(Failure::PostNotEdited)?;

    if edited.is_empty() {
        tracing::error!(post_id, "No post was updated");
        return Err(Failure::PostNotEdited.into());
    }
    let post = edited.remove(0);

    if let Some(image) = pending {
        image.upload(client).await?;
    }

    let removed = db::delete_post_tags_for_post(&client.pool, post.id)
        .await
        .or_fail(Failure::PostNotEdited)?;
    db::insert_post_tags(&client.pool, post.id, tag_ids)
        .await
        .or_fail(Failure::PostNotEdited)?;

    tracing::info!(
        post_id = post.id,
        removed_tags = removed,
        tags = tag_ids.len(),
        "Edited post"
    );
    Ok(post)
}

/// 게시글을 삭제합니다. 관계 행을 먼저 지워 고아 행이 남지 않게 합니다.
pub async fn delete_post(client: &BlogClient, post_id: i64) -> Result<(), AppError> {
    db::delete_post_tags_for_post(&client.pool, post_id)
        .await
        .or_fail(Failure::PostNotDeleted)?;

    let deleted = db::delete_post(&client.pool, post_id)
        .await
        .or_fail(Failure::PostNotDeleted)?;

    if deleted {
        tracing::info!(post_id, "Deleted post");
    } else {
        tracing::warn!(post_id, "Delete requested for a post that does not exist");
    }
    Ok(())
}

/// 모든 게시글-태그 관계 행을 조회합니다.
pub async fn fetch_post_tags(client: &BlogClient) -> Result<Vec<PostTag>, AppError> {
    db::select_post_tags(&client.pool)
        .await
        .or_fail(Failure::RelatedTagIdsNotFetched)
}

/// 게시글 하나에 태그 하나를 연결합니다.
pub async fn create_relation(
    client: &BlogClient,
    post_id: i64,
    tag_id: i64,
) -> Result<(), AppError> {
    db::insert_post_tags(&client.pool, post_id, &[tag_id])
        .await
        .or_fail(Failure::RelationNotCreated)?;
    Ok(())
}
