//! # 게시글-태그 관계 쿼리 모듈
//!
//! `post_tags` 다대다 관계 테이블을 다룹니다.
//!
//! ```text
//! tags ←── post_tags ──→ posts
//!  (1)       (N:M)        (1)
//! ```

use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// 관계 행 + 연결된 태그 (목록 조회 시 게시글별로 묶는 데 사용)
#[derive(Debug, sqlx::FromRow)]
struct TaggedRow {
    post_id: i64,
    id: i64,
    name: String,
    created_at: String,
}

/// 모든 관계 행을 조회합니다.
pub async fn select_post_tags(pool: &SqlitePool) -> Result<Vec<PostTag>, AppError> {
    let rows = sqlx::query_as::<_, PostTag>(
        "SELECT post_id, tag_id FROM post_tags ORDER BY post_id, tag_id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// 한 게시글의 관계 행을 조회합니다.
pub async fn select_post_tags_for_post(
    pool: &SqlitePool,
    post_id: i64,
) -> Result<Vec<PostTag>, AppError> {
    let rows = sqlx::query_as::<_, PostTag>(
        "SELECT post_id, tag_id FROM post_tags WHERE post_id = ? ORDER BY tag_id",
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// 여러 게시글의 관계 행을 태그와 JOIN해 `(post_id, Tag)` 목록으로 반환합니다.
pub async fn select_tags_for_posts(
    pool: &SqlitePool,
    post_ids: &[i64],
) -> Result<Vec<(i64, Tag)>, AppError> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT pt.post_id, t.id, t.name, t.created_at
        FROM post_tags pt
        JOIN tags t ON t.id = pt.tag_id
        WHERE pt.post_id IN ("#,
    );
    let mut separated = builder.separated(", ");
    for id in post_ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY pt.post_id, t.id");

    let rows = builder.build_query_as::<TaggedRow>().fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            (
                row.post_id,
                Tag {
                    id: row.id,
                    name: row.name,
                    created_at: row.created_at,
                },
            )
        })
        .collect())
}

/// 한 게시글에 태그 여러 개를 연결합니다. 삽입된 행 수를 반환합니다.
pub async fn insert_post_tags(
    pool: &SqlitePool,
    post_id: i64,
    tag_ids: &[i64],
) -> Result<u64, AppError> {
    if tag_ids.is_empty() {
        return Ok(0);
    }

    let mut builder = QueryBuilder::<Sqlite>::new("INSERT INTO post_tags (post_id, tag_id) ");
    builder.push_values(tag_ids, |mut row, tag_id| {
        row.push_bind(post_id).push_bind(*tag_id);
    });

    let result = builder.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// 한 게시글의 관계 행을 모두 삭제합니다.
pub async fn delete_post_tags_for_post(pool: &SqlitePool, post_id: i64) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM post_tags WHERE post_id = ?")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// 한 태그를 참조하는 관계 행을 모두 삭제합니다.
pub async fn delete_post_tags_for_tag(pool: &SqlitePool, tag_id: i64) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM post_tags WHERE tag_id = ?")
        .bind(tag_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
