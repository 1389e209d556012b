//! # 문서(Document) 라우트 핸들러
//!
//! 문서 목록과 문서 상세 화면(라이프사이클 액션 버튼 포함)을 제공합니다.
//!
//! ## 엔드포인트
//! - `GET /api/v1/documents`      → 문서 목록 (상태 배지 포함)
//! - `GET /api/v1/documents/{id}` → 문서 상세 뷰
//!
//! 데이터는 모두 컴플라이언스 백엔드에서 가져옵니다 (`state.backend`).
//! 이 서버가 더하는 것은 현재 버전에 대해 허용된 전이 목록(`actions`)과
//! 전이 진행 여부(`processing`)입니다.
//!
//! ## Axum 핸들러 패턴
//! - `State(state)`: 앱 전역 상태 (백엔드 클라이언트, 전이 테이블, 실행기)
//! - `Path(id)`: URL 경로 파라미터
//! - 반환 타입이 `Result<T, AppError>`이면 에러는 JSON 에러 응답으로 변환됩니다

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::*,
    services::{Transition, TransitionExecutor, TransitionTable},
    upstream::DocumentBackend,
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 필드가 모두 `Arc`(또는 내부가 `Arc`)라서 clone 비용이 작습니다.
#[derive(Clone)]
pub struct AppState {
    /// 컴플라이언스 백엔드
    pub backend: Arc<dyn DocumentBackend>,
    /// 서버 시작 시 한 번 만든 전이 테이블
    pub table: Arc<TransitionTable>,
    pub executor: TransitionExecutor,
}

impl AppState {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            executor: TransitionExecutor::new(Arc::clone(&backend)),
            table: Arc::new(TransitionTable::new()),
            backend,
        }
    }
}

/// 문서 상세 화면 데이터
#[derive(Debug, Serialize)]
pub struct DocumentView {
    #[serde(flatten)]
    pub document: Document,
    /// 버전 번호 오름차순
    pub versions: Vec<DocumentVersion>,
    pub current_version: Option<DocumentVersion>,
    pub badge: Option<StatusBadge>,
    /// 현재 버전에서 누를 수 있는 액션 버튼. 종료 상태면 빈 배열
    pub actions: &'static [Transition],
    /// 현재 버전에 대한 전이가 진행 중인지
    pub processing: bool,
}

/// 백엔드에서 받은 문서 이력으로 상세 뷰를 만듭니다.
pub fn document_view(
    state: &AppState,
    mut history: DocumentWithHistory,
) -> Result<DocumentView, AppError> {
    history.sort_versions();
    let current = history.current_version()?.cloned();

    let (badge, actions, processing) = match &current {
        Some(version) => (
            Some(version.status.badge()),
            state.table.available(version.status),
            state.executor.is_processing(&version.id),
        ),
        None => (None, &[] as &[Transition], false),
    };

    Ok(DocumentView {
        document: history.document,
        versions: history.versions,
        current_version: current,
        badge,
        actions,
        processing,
    })
}

/// `GET /documents` — 문서 목록을 조회합니다.
///
/// # 반환값
/// `{ "documents": [...] }`, 각 행에 현재 상태의 `badge`가 붙습니다.
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let documents: Vec<DocumentListItem> = state
        .backend
        .list_documents()
        .await?
        .into_iter()
        .map(DocumentListItem::from)
        .collect();
    Ok(Json(json!({ "documents": documents })))
}

/// `GET /documents/{id}` — 문서 상세 뷰를 조회합니다.
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentView>, AppError> {
    // 백엔드 404 → AppError::NotFound (From 구현 참고)
    let history = state.backend.fetch_document(&id).await?;
    Ok(Json(document_view(&state, history)?))
}
