//! # 태그 서비스
//!
//! 태그 목록 조회, 일괄 추가, 삭제와 게시글의 관련 태그 조회입니다.

use crate::{
    client::BlogClient,
    db,
    error::{AppError, Failure, OrFail},
    models::*,
};

/// 태그 목록을 정렬/페이지 기술자에 맞춰 조회합니다.
pub async fn fetch_tags(
    client: &BlogClient,
    sort: Option<&SortBy>,
    pagination: Pagination,
) -> Result<TagList, AppError> {
    let (tags, count) = db::select_tags(&client.pool, sort, pagination.range())
        .await
        .or_fail(Failure::TagsNotFetched)?;

    Ok(TagList { tags, count })
}

/// 모든 태그를 최신순으로 조회합니다 (태그 선택 목록용).
pub async fn fetch_all_tags(client: &BlogClient) -> Result<Vec<Tag>, AppError> {
    db::select_all_tags(&client.pool)
        .await
        .or_fail(Failure::TagsNotFetched)
}

/// 태그 이름들을 한 번에 추가하고, 추가된 태그를 반환합니다.
///
/// 앞뒤 공백은 잘라내고, 빈 이름은 건너뜁니다.
pub async fn add_tags(client: &BlogClient, names: &[String]) -> Result<Vec<Tag>, AppError> {
    let names: Vec<String> = names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    let tags = db::insert_tags(&client.pool, &names)
        .await
        .or_fail(Failure::TagsNotAdded)?;

    tracing::info!(count = tags.len(), "Added tags");
    Ok(tags)
}

/// 게시글에 연결된 태그를 조회합니다.
///
/// 1단계: 관계 행에서 태그 ID를 모읍니다. (실패: "The related tag id/ids could not be fetched.")
/// 2단계: 그 ID에 해당하는 태그를 조회합니다. (실패: "The related tag could not be fetched.")
pub async fn fetch_related_tags(client: &BlogClient, post_id: i64) -> Result<Vec<Tag>, AppError> {
    let relations = db::select_post_tags_for_post(&client.pool, post_id)
        .await
        .or_fail(Failure::RelatedTagIdsNotFetched)?;

    let tag_ids: Vec<i64> = relations.iter().map(|r| r.tag_id).collect();

    db::select_tags_by_ids(&client.pool, &tag_ids)
        .await
        .or_fail(Failure::RelatedTagsNotFetched)
}

/// 태그를 삭제합니다. 관계 행을 먼저 지운 뒤 태그 행을 지웁니다.
pub async fn delete_tag(client: &BlogClient, tag_id: i64) -> Result<(), AppError> {
    let removed = db::delete_post_tags_for_tag(&client.pool, tag_id)
        .await
        .or_fail(Failure::RelationNotDeleted)?;

    db::delete_tag(&client.pool, tag_id)
        .await
        .or_fail(Failure::TagNotDeleted)?;

    tracing::info!(tag_id, removed_relations = removed, "Deleted tag");
    Ok(())
}
