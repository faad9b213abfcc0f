//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `STORAGE_URL`: 업로드된 이미지의 공개 URL 기준 주소
//! - `UPLOADS_PATH`: 객체 저장소(버킷) 루트 디렉토리
//! - `HOST`, `PORT`: 서버 바인딩 주소
//! - `MAX_UPLOAD_BYTES`: multipart 요청 본문 최대 크기
//! - `QUERY_CACHE_ENTRIES`: 조회 결과 캐시 항목 수 상한

use crate::hooks::query_client::DEFAULT_MAX_ENTRIES;
use std::env;

/// multipart 본문 기본 상한 (20MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// 애플리케이션 전체 설정을 담는 구조체
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/blog.db")
    pub database_url: String,
    /// 공개 이미지 URL의 기준 주소 (예: "http://localhost:3000")
    pub storage_url: String,
    /// 객체 저장소 루트 디렉토리. 버킷은 이 아래의 하위 디렉토리입니다.
    pub uploads_path: String,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub query_cache_entries: usize,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`이 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있습니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            // 끝의 '/'는 잘라내서 URL을 조립할 때 "//"가 생기지 않게 합니다.
            storage_url: env::var("STORAGE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", port))
                .trim_end_matches('/')
                .to_string(),
            uploads_path: env::var("UPLOADS_PATH")
                .unwrap_or_else(|_| "data/uploads".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            query_cache_entries: env::var("QUERY_CACHE_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_ENTRIES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for key in [
            "DATABASE_URL",
            "STORAGE_URL",
            "UPLOADS_PATH",
            "HOST",
            "PORT",
            "MAX_UPLOAD_BYTES",
            "QUERY_CACHE_ENTRIES",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn database_url_is_required() {
        clear();
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn defaults_apply_when_optional_vars_are_missing() {
        clear();
        env::set_var("DATABASE_URL", "sqlite::memory:");

        let config = Config::from_env().unwrap();
        assert_eq!(config.storage_url, "http://localhost:3000");
        assert_eq!(config.uploads_path, "data/uploads");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.query_cache_entries, DEFAULT_MAX_ENTRIES);
        clear();
    }

    #[test]
    #[serial]
    fn storage_url_drops_trailing_slash_and_bad_port_falls_back() {
        clear();
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("STORAGE_URL", "https://cdn.example.com/");
        env::set_var("PORT", "not-a-port");

        let config = Config::from_env().unwrap();
        assert_eq!(config.storage_url, "https://cdn.example.com");
        assert_eq!(config.port, 3000);
        clear();
    }
}
