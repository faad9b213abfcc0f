//! # 태그 데이터베이스 쿼리 모듈
//!
//! `tags` 테이블의 조회/일괄 삽입/삭제 쿼리 함수들입니다.
//! 모든 함수는 `SqlitePool` 참조를 받아 비동기로 실행됩니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

/// 정렬에 쓸 수 있는 `tags` 컬럼
pub const TAG_SORT_FIELDS: &[&str] = &["id", "name", "created_at"];

/// 태그 목록과 전체 개수를 조회합니다. 범위 계산은 게시글 목록과 같습니다.
pub async fn select_tags(
    pool: &SqlitePool,
    sort: Option<&SortBy>,
    range: Option<(u64, u64)>,
) -> Result<(Vec<Tag>, i64), AppError> {
    let order = match sort {
        Some(sort) => sort.order_clause(TAG_SORT_FIELDS).map_err(AppError::BadRequest)?,
        None => " ORDER BY id ASC".to_string(),
    };
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tags")
        .fetch_one(pool)
        .await?;

    let window = match range {
        Some(range) => match limit_offset(range) {
            Some(window) => Some(window),
            None => return Ok((Vec::new(), count)),
        },
        None => None,
    };

    let mut sql = format!("SELECT id, name, created_at FROM tags{}", order);
    if window.is_some() {
        sql.push_str(" LIMIT ? OFFSET ?");
    }

    let mut query = sqlx::query_as::<_, Tag>(&sql);
    if let Some((limit, offset)) = window {
        query = query.bind(limit).bind(offset);
    }
    let tags = query.fetch_all(pool).await?;

    Ok((tags, count))
}

/// 모든 태그를 최신순으로 조회합니다.
///
/// 같은 시각에 만들어진 태그는 id 내림차순으로 정렬합니다.
pub async fn select_all_tags(pool: &SqlitePool) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        "SELECT id, name, created_at FROM tags ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(tags)
}

/// ID 집합에 속한 태그를 조회합니다. 빈 집합이면 쿼리 없이 빈 Vec.
pub async fn select_tags_by_ids(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<Tag>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder =
        QueryBuilder::<Sqlite>::new("SELECT id, name, created_at FROM tags WHERE id IN (");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(") ORDER BY id");

    let tags = builder.build_query_as::<Tag>().fetch_all(pool).await?;
    Ok(tags)
}

/// 태그 이름 여러 개를 한 번에 삽입하고, 삽입된 행을 반환합니다.
pub async fn insert_tags(pool: &SqlitePool, names: &[String]) -> Result<Vec<Tag>, AppError> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new("INSERT INTO tags (name) ");
    builder.push_values(names, |mut row, name| {
        row.push_bind(name.clone());
    });
    builder.push(" RETURNING id, name, created_at");

    let tags = builder.build_query_as::<Tag>().fetch_all(pool).await?;
    Ok(tags)
}

/// ID로 태그를 삭제합니다.
///
/// `post_tags`에는 CASCADE가 없으므로, 관계 행을 먼저 지우지 않으면
/// 외래키 제약으로 실패합니다.
pub async fn delete_tag(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
