//! 파일시스템 기반 객체 저장소
//!
//! `{root}/{bucket}/{name}` 구조로 저장합니다. 서버는 `root`를
//! `/storage/v1/object/public` 아래에 정적 파일로 공개합니다.

use super::ObjectStorage;
use crate::error::AppError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
}

impl FileSystemStorage {
    /// 루트 디렉토리가 없으면 만듭니다.
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, bucket: &str, name: &str) -> Result<PathBuf, AppError> {
        // 객체 이름은 버킷 디렉토리를 벗어나면 안 됩니다.
        if name.is_empty() || name.contains('/') || name.contains('\\') || name == ".." {
            return Err(AppError::BadRequest(format!("invalid object name: {}", name)));
        }
        Ok(self.root.join(bucket).join(name))
    }
}

#[async_trait]
impl ObjectStorage for FileSystemStorage {
    async fn upload(&self, bucket: &str, name: &str, bytes: &[u8]) -> Result<(), AppError> {
        let path = self.object_path(bucket, name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // create_new: 이미 있으면 AlreadyExists 에러
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::debug!(bucket, name, size = bytes.len(), "Uploaded object");
        Ok(())
    }

    async fn exists(&self, bucket: &str, name: &str) -> Result<bool, AppError> {
        let path = self.object_path(bucket, name)?;
        Ok(fs::try_exists(path).await?)
    }
}
