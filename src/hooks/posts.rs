//! 게시글 훅

use super::{keys, Mutation};
use crate::{error::AppError, models::*, services, state::AppState};

/// 새 id로 미리 조회된 관련 태그(빈 목록)도 함께 무효화합니다.
pub fn use_create_post(state: &AppState) -> Mutation {
    Mutation::new(
        state.queries.clone(),
        state.notifier.clone(),
        "New post successfully created.",
    )
    .invalidates(keys::posts())
    .invalidates(keys::related_tags())
}

/// 수정은 목록, 단건, 관련 태그 조회 모두에 영향을 줍니다.
pub fn use_edit_post(state: &AppState) -> Mutation {
    Mutation::new(
        state.queries.clone(),
        state.notifier.clone(),
        "Post successfully edited.",
    )
    .invalidates(keys::posts())
    .invalidates(keys::post())
    .invalidates(keys::related_tags())
}

pub fn use_delete_post(state: &AppState) -> Mutation {
    Mutation::new(
        state.queries.clone(),
        state.notifier.clone(),
        "Post successfully deleted.",
    )
    .invalidates(keys::posts())
    .invalidates(keys::post())
    .invalidates(keys::related_tags())
}

pub async fn use_posts(
    state: &AppState,
    sort: Option<&SortBy>,
    pagination: Pagination,
) -> Result<PostList, AppError> {
    state
        .queries
        .fetch_query(keys::posts_page(sort, pagination), || {
            services::fetch_posts(&state.client, sort, pagination)
        })
        .await
}

pub async fn use_post(state: &AppState, slug: &str) -> Result<PostWithTags, AppError> {
    state
        .queries
        .fetch_query(keys::post_by_slug(slug), || {
            services::fetch_post(&state.client, slug)
        })
        .await
}
