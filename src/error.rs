//! # 에러 처리 모듈
//!
//! 블로그 관리자에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형: 모든 에러 종류를 하나의 타입으로 통합
//! - `Failure` 열거형: 사용자에게 그대로 보여주는 "작업 이름이 붙은" 고정 메시지
//! - `OrFail` 트레이트: 백엔드의 원본 에러 메시지는 로그에만 남기고,
//!   호출자에게는 고정 메시지(`Failure`)만 전달하는 변환기
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt::Display;
use thiserror::Error;

/// 작업별 고정 실패 메시지
///
/// 백엔드가 어떤 이유(없음/충돌/네트워크)로 실패했는지는 구분하지 않습니다.
/// "실패했다"는 사실과 어떤 작업이 실패했는지만 사용자에게 알립니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("Posts could not be loaded")]
    PostsNotLoaded,
    #[error("Post could not be loaded")]
    PostNotLoaded,
    #[error("Posts could not be created.")]
    PostNotCreated,
    #[error("Posts could not be edited.")]
    PostNotEdited,
    #[error("Posts could not be deleted.")]
    PostNotDeleted,
    #[error("An error occurred while uploading the image.")]
    ImageNotUploaded,
    #[error("Tags could not be fetched")]
    TagsNotFetched,
    #[error("Tags could not be added")]
    TagsNotAdded,
    #[error("The related tag id/ids could not be fetched.")]
    RelatedTagIdsNotFetched,
    #[error("The related tag could not be fetched.")]
    RelatedTagsNotFetched,
    #[error("The post-tag relation could not be deleted.")]
    RelationNotDeleted,
    #[error("The post-tag relation could not be created.")]
    RelationNotCreated,
    #[error("The tag could not be deleted.")]
    TagNotDeleted,
}

impl Failure {
    /// 에러 응답의 `code` 필드에 쓰이는 기계용 식별자
    pub fn code(&self) -> &'static str {
        match self {
            Failure::PostsNotLoaded | Failure::PostNotLoaded => "posts_not_loaded",
            Failure::PostNotCreated => "post_not_created",
            Failure::PostNotEdited => "post_not_edited",
            Failure::PostNotDeleted => "post_not_deleted",
            Failure::ImageNotUploaded => "image_not_uploaded",
            Failure::TagsNotFetched => "tags_not_fetched",
            Failure::TagsNotAdded => "tags_not_added",
            Failure::RelatedTagIdsNotFetched | Failure::RelatedTagsNotFetched => {
                "related_tags_not_fetched"
            }
            Failure::RelationNotDeleted => "relation_not_deleted",
            Failure::RelationNotCreated => "relation_not_created",
            Failure::TagNotDeleted => "tag_not_deleted",
        }
    }
}

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400). 주로 multipart 폼 파싱 실패
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수 결과에 `?`를 쓰면 자동으로 이 variant로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 작업 실패. 메시지는 `Failure`의 고정 문구 그대로입니다.
    #[error(transparent)]
    Failed(#[from] Failure),
}

impl AppError {
    /// 이 에러가 특정 작업 실패(`Failure`)인지 꺼내봅니다.
    pub fn failure(&self) -> Option<Failure> {
        match self {
            AppError::Failed(failure) => Some(*failure),
            _ => None,
        }
    }
}

/// 백엔드 결과를 작업별 고정 실패로 바꾸는 확장 트레이트
///
/// ```ignore
/// let rows = db::select_posts(pool, sort, range)
///     .await
///     .or_fail(Failure::PostsNotLoaded)?;
/// ```
///
/// 원본 에러 메시지는 `tracing::error!`로 진단용 로그에 남기고,
/// 호출자에게는 `AppError::Failed(failure)`만 돌려줍니다.
pub trait OrFail<T> {
    fn or_fail(self, failure: Failure) -> Result<T, AppError>;
}

impl<T, E: Display> OrFail<T> for Result<T, E> {
    fn or_fail(self, failure: Failure) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!(error = %e, code = failure.code(), "{}", failure);
            AppError::Failed(failure)
        })
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, IO, Internal)는 실제 내용을 로그에만 기록하고
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    /// `Failed`는 이미 사용자용 문구이므로 그대로 내보냅니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "An IO error occurred".to_string(),
                )
            }
            AppError::Failed(failure) => {
                // 단건 조회 실패만 404로 돌려주고, 나머지는 모두 500입니다.
                let status = match failure {
                    Failure::PostNotLoaded => StatusCode::NOT_FOUND,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, failure.code(), failure.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_fail_replaces_backend_message_with_fixed_one() {
        let backend: Result<(), String> = Err("relation \"posts\" does not exist".to_string());
        let err = backend.or_fail(Failure::PostsNotLoaded).unwrap_err();

        assert_eq!(err.failure(), Some(Failure::PostsNotLoaded));
        assert_eq!(err.to_string(), "Posts could not be loaded");
    }

    #[test]
    fn or_fail_keeps_success_values() {
        let ok: Result<i32, String> = Ok(7);
        assert_eq!(ok.or_fail(Failure::TagsNotAdded).unwrap(), 7);
    }

    #[test]
    fn failed_post_lookup_maps_to_not_found() {
        let response = AppError::Failed(Failure::PostNotLoaded).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::Failed(Failure::TagNotDeleted).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
