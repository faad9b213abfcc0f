//! # 게시글 데이터베이스 쿼리 모듈
//!
//! `posts` 테이블의 select/insert/update/delete 쿼리입니다.
//! 작업별 실패 메시지로의 변환은 `services::posts`가 담당하고,
//! 여기서는 sqlx 에러를 `AppError`로 그대로 올려보냅니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

const POST_COLUMNS: &str = "id, slug, title, body, cover_image, created_at, modified_at";

/// 정렬에 쓸 수 있는 `posts` 컬럼
pub const POST_SORT_FIELDS: &[&str] = &["id", "slug", "title", "created_at", "modified_at"];

/// 게시글 목록과 전체 개수를 조회합니다.
///
/// - `sort`: 없으면 id 오름차순 (페이지가 매번 같은 순서로 잘리도록)
/// - `range`: 0부터 시작하는 포함 범위. `LIMIT/OFFSET`으로 바꿔 적용합니다.
pub async fn select_posts(
    pool: &SqlitePool,
    sort: Option<&SortBy>,
    range: Option<(u64, u64)>,
) -> Result<(Vec<Post>, i64), AppError> {
    let order = match sort {
        Some(sort) => sort.order_clause(POST_SORT_FIELDS).map_err(AppError::BadRequest)?,
        None => " ORDER BY id ASC".to_string(),
    };
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await?;

    let window = match range {
        Some(range) => match limit_offset(range) {
            Some(window) => Some(window),
            None => return Ok((Vec::new(), count)),
        },
        None => None,
    };

    let mut sql = format!("SELECT {} FROM posts{}", POST_COLUMNS, order);
    if window.is_some() {
        sql.push_str(" LIMIT ? OFFSET ?");
    }

    let mut query = sqlx::query_as::<_, Post>(&sql);
    if let Some((limit, offset)) = window {
        query = query.bind(limit).bind(offset);
    }
    let posts = query.fetch_all(pool).await?;

    Ok((posts, count))
}

/// slug가 같은 게시글을 모두 조회합니다. 정확히 한 건인지는 호출자가 판단합니다.
pub async fn select_posts_by_slug(pool: &SqlitePool, slug: &str) -> Result<Vec<Post>, AppError> {
    let sql = format!("SELECT {} FROM posts WHERE slug = ?", POST_COLUMNS);
    let posts = sqlx::query_as::<_, Post>(&sql)
        .bind(slug)
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// 게시글을 삽입하고 저장된 행을 반환합니다.
///
/// `RETURNING`으로 DB 기본값(id, created_at)이 채워진 행을 바로 받습니다.
pub async fn insert_post(
    pool: &SqlitePool,
    slug: &str,
    title: &str,
    body: &str,
    cover_image: &str,
) -> Result<Post, AppError> {
    let sql = format!(
        "INSERT INTO posts (slug, title, body, cover_image) VALUES (?, ?, ?, ?) RETURNING {}",
        POST_COLUMNS
    );
    let post = sqlx::query_as::<_, Post>(&sql)
        .bind(slug)
        .bind(title)
        .bind(body)
        .bind(cover_image)
        .fetch_one(pool)
        .await?;

    Ok(post)
}

/// 게시글을 수정하고 수정된 행들을 반환합니다 (없는 ID면 빈 Vec).
///
/// `cover_image`가 None이면 기존 커버 이미지를 그대로 둡니다.
pub async fn update_post(
    pool: &SqlitePool,
    id: i64,
    slug: &str,
    title: &str,
    body: &str,
    cover_image: Option<&str>,
    modified_at: &str,
) -> Result<Vec<Post>, AppError> {
    let sql = format!(
        r#"
        UPDATE posts
        SET slug = ?, title = ?, body = ?,
            cover_image = COALESCE(?, cover_image),
            modified_at = ?
        WHERE id = ?
        RETURNING {}
        "#,
        POST_COLUMNS
    );
    let posts = sqlx::query_as::<_, Post>(&sql)
        .bind(slug)
        .bind(title)
        .bind(body)
        .bind(cover_image)
        .bind(modified_at)
        .bind(id)
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// ID로 게시글을 삭제합니다. 삭제된 행이 있으면 true.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
