//! # 태그 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/tags | `list_tags` | 태그 목록 (정렬/페이지) |
//! | GET | /api/v1/tags/all | `list_all_tags` | 전체 태그 (최신순) |
//! | POST | /api/v1/tags | `add_tags` | 태그 일괄 추가 |
//! | DELETE | /api/v1/tags/{id} | `delete_tag` | 태그 삭제 (관계 행 먼저) |

use crate::{
    error::AppError,
    hooks::{self, Toast},
    models::*,
    routes::ListQuery,
    services,
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

/// `GET /tags?sort=name&direction=asc&page=2&per_page=10` → `{ "tags": [...], "count": n }`
pub async fn list_tags(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TagList>, AppError> {
    let sort = query.sort_by();
    let tags = hooks::use_tags(&state, sort.as_ref(), query.pagination()).await?;
    Ok(Json(tags))
}

/// `GET /tags/all` → `{ "tags": [...] }`
pub async fn list_all_tags(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let tags = hooks::use_all_tags(&state).await?;
    Ok(Json(json!({ "tags": tags })))
}

/// `POST /tags` + `{ "names": ["rust", "axum"] }` → `201 Created` + `{ "tags": [...], "toast": ... }`
pub async fn add_tags(
    State(state): State<AppState>,
    Json(req): Json<AddTagsRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let mutation = hooks::use_add_tags(&state);
    let tags = mutation
        .mutate(services::add_tags(&state.client, &req.names))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "tags": tags, "toast": Toast::success(mutation.success_message()) })),
    ))
}

/// `DELETE /tags/{id}` → `{ "toast": ... }`
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let mutation = hooks::use_delete_tag(&state);
    mutation.mutate(services::delete_tag(&state.client, id)).await?;

    Ok(Json(json!({ "toast": Toast::success(mutation.success_message()) })))
}
