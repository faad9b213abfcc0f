//! # 객체 저장소(Object Storage)
//!
//! 커버 이미지를 올리는 저장소 경계입니다. 게시글 서비스는 `ObjectStorage`
//! 트레이트 객체만 알고, 실제 저장 방식(파일시스템, 테스트 더블 등)은 주입받습니다.
//!
//! 공개 URL 규칙:
//! `{storage_url}/storage/v1/object/public/{bucket}/{object name}`

pub mod filesystem;

pub use filesystem::FileSystemStorage;

use crate::error::AppError;
use async_trait::async_trait;
use rand_core::{OsRng, RngCore};

/// 게시글 커버 이미지가 들어가는 버킷
pub const BLOG_BUCKET: &str = "blog";

/// 공개 객체 URL의 경로 접두사
pub const PUBLIC_OBJECT_PATH: &str = "/storage/v1/object/public";

/// 객체 저장소 트레이트
///
/// `Send + Sync`: 여러 요청 핸들러가 `Arc<dyn ObjectStorage>`로 공유합니다.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// `bucket` 안에 `name`으로 바이트를 저장합니다.
    ///
    /// 같은 이름의 객체가 이미 있으면 덮어쓰지 않고 에러를 반환합니다.
    async fn upload(&self, bucket: &str, name: &str, bytes: &[u8]) -> Result<(), AppError>;

    /// 객체가 존재하는지 확인합니다.
    async fn exists(&self, bucket: &str, name: &str) -> Result<bool, AppError>;
}

/// 원본 파일 이름으로 무작위 객체 이름을 만듭니다.
///
/// `"{0 이상 1 미만 난수}-{파일 이름}"`에서 `/`를 모두 제거합니다.
pub fn image_name(file_name: &str) -> String {
    image_name_with(random_fraction(), file_name)
}

/// 난수를 직접 받는 버전 (테스트용으로도 사용)
pub fn image_name_with(fraction: f64, file_name: &str) -> String {
    format!("{}-{}", fraction, file_name).replace('/', "")
}

/// 블로그 버킷 객체의 공개 URL
pub fn public_image_url(storage_url: &str, name: &str) -> String {
    format!(
        "{}{}/{}/{}",
        storage_url.trim_end_matches('/'),
        PUBLIC_OBJECT_PATH,
        BLOG_BUCKET,
        name
    )
}

/// `[0, 1)` 구간의 난수. 상위 53비트만 써서 f64 가수부에 정확히 들어가게 합니다.
fn random_fraction() -> f64 {
    (OsRng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_name_strips_slashes() {
        assert_eq!(
            image_name_with(0.25, "covers/2024/sea.png"),
            "0.25-covers2024sea.png"
        );
    }

    #[test]
    fn random_names_differ_and_keep_file_name() {
        let a = image_name("cat.jpg");
        let b = image_name("cat.jpg");
        assert_ne!(a, b);
        assert!(a.ends_with("-cat.jpg"));
        assert!(a.starts_with("0."));
    }

    #[test]
    fn public_url_uses_blog_bucket_path() {
        assert_eq!(
            public_image_url("https://db.example.com/", "0.5-a.png"),
            "https://db.example.com/storage/v1/object/public/blog/0.5-a.png"
        );
    }
}
