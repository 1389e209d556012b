//! # cordocs 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. 컴플라이언스 백엔드 HTTP 클라이언트 생성
//! 5. 전이 테이블/실행기를 담은 애플리케이션 상태 생성
//! 6. API 라우터 설정 (+ 프론트엔드 정적 파일)
//! 7. HTTP 서버 시작

use std::{path::Path, sync::Arc};

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use axum::Router;
use cordocs::{
    config::Config,
    routes::{self, AppState},
    upstream::HttpBackend,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 cordocs, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cordocs=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting cordocs on {}:{}", config.host, config.port);

    // ── 4단계: 백엔드 클라이언트 ──
    // 문서/버전 데이터는 모두 컴플라이언스 백엔드가 가지고 있습니다.
    let backend = HttpBackend::new(
        &config.upstream_url,
        config.upstream_api_key.clone(),
        config.upstream_timeout,
    )?;
    tracing::info!(
        "Using document backend at {} (timeout {:?})",
        config.upstream_url,
        config.upstream_timeout
    );

    // ── 5단계: 애플리케이션 상태 ──
    // 전이 테이블은 여기서 한 번만 만들어지고 모든 핸들러가 공유합니다.
    let state = AppState::new(Arc::new(backend));

    // 어떤 전이로도 도달할 수 없는 상태가 있으면 알려둡니다 (현재: archived)
    let unreachable = state.table.unreachable_statuses();
    if !unreachable.is_empty() {
        tracing::warn!(
            "No lifecycle transition leads to: {:?}; these statuses can only be set by the backend",
            unreachable
        );
    }

    // ── 6단계: 라우터 설정 ──
    let api_routes = routes::api_router(state);

    // 개발 환경에서는 Any(모두 허용)로 설정합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 빌드된 프론트엔드가 있으면 같은 서버에서 서빙합니다 (SPA이므로 없는 경로는 index.html).
    let frontend_dist = Path::new(&config.frontend_dist);
    let app = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from {}", config.frontend_dist);

        let serve_dir = ServeDir::new(frontend_dist)
            .not_found_service(ServeFile::new(frontend_dist.join("index.html")));

        Router::new()
            .nest("/api/v1", api_routes)
            .fallback_service(serve_dir)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!("Frontend dist directory not found, serving API only");

        Router::new()
            .nest("/api/v1", api_routes)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    };

    // ── 7단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
