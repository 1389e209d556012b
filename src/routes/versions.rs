use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::{CreateVersionRequest, NewVersion, TransitionRequest},
};

use super::documents::{document_view, AppState, DocumentView};

/// `GET /documents/{id}/versions/{version_id}/transitions`
/// 해당 버전에서 가능한 액션 버튼 목록
pub async fn list_version_transitions(
    State(state): State<AppState>,
    Path((id, version_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let history = state.backend.fetch_document(&id).await?;
    let version = history.version(&version_id).ok_or(AppError::NotFound)?;

    Ok(Json(json!({
        "version_id": version.id,
        "status": version.status,
        "badge": version.status.badge(),
        "actions": state.table.available(version.status),
        "processing": state.executor.is_processing(&version.id),
    })))
}

/// `POST /documents/{id}/versions/{version_id}/transitions` — 전이 실행
///
/// 합법성 검사는 실행기가 처리 중 표시를 잡은 다음에 합니다 (`apply_checked`).
/// 종료 상태(obsolete, archived)는 허용 목록이 비어 있어서 업데이트까지 가지 않습니다.
pub async fn apply_transition(
    State(state): State<AppState>,
    Path((id, version_id)): Path<(String, String)>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Result<Json<DocumentView>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let refreshed = state
        .executor
        .apply_checked(&state.table, &id, &version_id, req.target_status)
        .await?;
    Ok(Json(document_view(&state, refreshed)?))
}

/// `POST /documents/{id}/versions` — 새 버전 초안 생성
///
/// 다음 버전 번호는 이력의 가장 큰 번호에서 계산합니다 (이력이 없으면 1.0).
/// 새 버전의 상태(draft)와 `is_current` 이동은 백엔드가 처리합니다.
pub async fn create_version(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CreateVersionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DocumentView>), AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let history = state.backend.fetch_document(&id).await?;
    let new_version = NewVersion {
        version_number: req.bump.next_after(history.version_numbers())?,
        file_reference: req.file_reference,
        change_summary: req.change_summary,
    };

    let created = state.backend.create_version(&id, &new_version).await?;
    tracing::info!(
        document_id = %id,
        version_id = %created.id,
        version = %created.version_number,
        "drafted new document version"
    );

    let refreshed = state.backend.fetch_document(&id).await?;
    Ok((StatusCode::CREATED, Json(document_view(&state, refreshed)?)))
}
