//! 통합 테스트 공용 도우미: 메모리 DB, 임시 저장소, 실패하는 저장소

#![allow(dead_code)]

use async_trait::async_trait;
use blog_admin::{
    hooks::ToastLog,
    models::{CoverImage, NewPost, Tag},
    services,
    storage::{FileSystemStorage, ObjectStorage},
    AppError, AppState, BlogClient,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::Arc;
use tempfile::TempDir;

pub const STORAGE_URL: &str = "http://localhost:3000";

/// 메모리 DB는 연결마다 따로 생기므로 연결을 하나로 고정합니다.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

pub struct TestBackend {
    pub client: BlogClient,
    pub storage: FileSystemStorage,
    // drop되면 디렉토리가 지워지므로 테스트 동안 붙잡아 둡니다.
    pub storage_dir: TempDir,
}

pub async fn test_backend() -> TestBackend {
    let storage_dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(storage_dir.path()).await.unwrap();
    let client = BlogClient::new(test_pool().await, Arc::new(storage.clone()), STORAGE_URL);
    TestBackend {
        client,
        storage,
        storage_dir,
    }
}

/// 업로드가 항상 실패하는 저장소
pub struct FailingStorage;

#[async_trait]
impl ObjectStorage for FailingStorage {
    async fn upload(&self, _bucket: &str, _name: &str, _bytes: &[u8]) -> Result<(), AppError> {
        Err(AppError::Internal("bucket unavailable".to_string()))
    }

    async fn exists(&self, _bucket: &str, _name: &str) -> Result<bool, AppError> {
        Ok(false)
    }
}

pub async fn failing_backend() -> BlogClient {
    BlogClient::new(test_pool().await, Arc::new(FailingStorage), STORAGE_URL)
}

pub struct TestState {
    pub state: AppState,
    pub toasts: Arc<ToastLog>,
    pub backend: TestBackend,
}

pub async fn test_state() -> TestState {
    let backend = test_backend().await;
    let toasts = Arc::new(ToastLog::new());
    let state = AppState::new(backend.client.clone(), toasts.clone());
    TestState {
        state,
        toasts,
        backend,
    }
}

pub fn pending_post(slug: &str, title: &str) -> NewPost {
    NewPost {
        slug: slug.to_string(),
        title: title.to_string(),
        body: format!("Body of {}", title),
        cover_image: CoverImage::pending("cover.png", b"\x89PNG fake".to_vec()),
    }
}

pub fn uploaded_post(slug: &str, title: &str, url: &str) -> NewPost {
    NewPost {
        slug: slug.to_string(),
        title: title.to_string(),
        body: String::new(),
        cover_image: CoverImage::Uploaded(url.to_string()),
    }
}

pub async fn add_tags(client: &BlogClient, names: &[&str]) -> Vec<Tag> {
    let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let mut tags = services::add_tags(client, &names).await.unwrap();
    // id는 삽입 순서대로 증가하므로 id 순으로 맞춰 두면 `names` 순서와 같습니다.
    tags.sort_by_key(|t| t.id);
    tags
}

pub fn ids(tags: &[Tag]) -> Vec<i64> {
    let mut ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
    ids.sort();
    ids
}
