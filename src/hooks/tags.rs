//! 태그 훅

use super::{keys, Mutation};
use crate::{error::AppError, models::*, services, state::AppState};

pub fn use_add_tags(state: &AppState) -> Mutation {
    Mutation::new(
        state.queries.clone(),
        state.notifier.clone(),
        "Tags successfully added.",
    )
    .invalidates(keys::tags())
}

/// 태그 삭제는 그 태그가 붙어 있던 게시글 조회까지 낡게 만듭니다.
pub fn use_delete_tag(state: &AppState) -> Mutation {
    Mutation::new(
        state.queries.clone(),
        state.notifier.clone(),
        "Tag successfully deleted.",
    )
    .invalidates(keys::tags())
    .invalidates(keys::posts())
    .invalidates(keys::post())
    .invalidates(keys::related_tags())
}

pub async fn use_tags(
    state: &AppState,
    sort: Option<&SortBy>,
    pagination: Pagination,
) -> Result<TagList, AppError> {
    state
        .queries
        .fetch_query(keys::tags_page(sort, pagination), || {
            services::fetch_tags(&state.client, sort, pagination)
        })
        .await
}

pub async fn use_all_tags(state: &AppState) -> Result<Vec<Tag>, AppError> {
    state
        .queries
        .fetch_query(keys::all_tags(), || services::fetch_all_tags(&state.client))
        .await
}

/// 게시글 하나의 관련 태그
pub async fn use_tag(state: &AppState, post_id: i64) -> Result<Vec<Tag>, AppError> {
    state
        .queries
        .fetch_query(keys::related_tags_of(post_id), || {
            services::fetch_related_tags(&state.client, post_id)
        })
        .await
}
