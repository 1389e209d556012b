//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `documents`: 문서 목록/상세 뷰, 공유 상태(`AppState`)
//! - `versions`: 버전별 전이 조회/실행, 새 버전 초안
//! - `lifecycle`: 전이 테이블 전체 조회
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod documents;
pub mod health;
pub mod lifecycle;
pub mod versions;

// `routes::list_documents`처럼 바로 접근 가능하게 재공개합니다.
pub use documents::*;
pub use health::*;
pub use lifecycle::*;
pub use versions::*;

use axum::{
    routing::{get, post},
    Router,
};

/// `/api/v1` 아래에 붙는 API 라우터
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/documents", get(list_documents))
        .route("/documents/{id}", get(get_document))
        .route("/documents/{id}/versions", post(create_version))
        .route(
            "/documents/{id}/versions/{version_id}/transitions",
            get(list_version_transitions).post(apply_transition),
        )
        .route("/lifecycle", get(get_lifecycle))
        .route("/health", get(health_check))
        .with_state(state)
}
