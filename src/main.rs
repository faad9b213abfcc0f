//! # blog-admin 서버 진입점
//!
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성과 마이그레이션
//! 4. 객체 저장소(업로드 디렉토리) 준비
//! 5. API 라우터 + 공개 이미지 경로 설정
//! 6. HTTP 서버 시작

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, Router};
use blog_admin::{
    client::BlogClient,
    config::Config,
    hooks::{QueryClient, TracingNotifier},
    routes,
    state::AppState,
    storage::{FileSystemStorage, PUBLIC_OBJECT_PATH},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{str::FromStr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_admin=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting blog-admin server on {}:{}", config.host, config.port);

    // create_if_missing: 처음 실행할 때 DB 파일을 만듭니다.
    // foreign_keys는 sqlx 기본값(켜짐)을 그대로 둡니다.
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    let storage = FileSystemStorage::new(&config.uploads_path).await?;
    tracing::info!("Object storage root: {}", storage.root().display());

    let client = BlogClient::new(pool, Arc::new(storage), config.storage_url.clone());
    let state = AppState::new(client, Arc::new(TracingNotifier))
        .with_queries(QueryClient::with_max_entries(config.query_cache_entries));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 업로드된 커버 이미지는 {STORAGE_URL}/storage/v1/object/public/{bucket}/{name}으로 공개됩니다.
    let app = Router::new()
        .nest("/api/v1", routes::api_router(state))
        .nest_service(PUBLIC_OBJECT_PATH, ServeDir::new(&config.uploads_path))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
