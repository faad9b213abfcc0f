//! # blog-admin
//!
//! 블로그 관리자 화면의 데이터 접근 계층입니다.
//! 게시글·태그·게시글-태그 관계를 원격 관계형 저장소(SQLite 풀)와
//! 객체 저장소(커버 이미지)에 대해 조회/생성/수정/삭제합니다.
//!
//! 계층 구조:
//! ```text
//! routes (HTTP) → hooks (캐시·알림·진행 상태) → services (작업 순서) → db / storage
//! ```

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod hooks;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod ui;

pub use client::BlogClient;
pub use error::{AppError, Failure};
pub use state::AppState;
