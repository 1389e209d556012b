//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//! - `From` 구현: 백엔드 에러(`UpstreamError`)와 전이 에러(`TransitionError`)를
//!   `?` 연산자 한 번으로 `AppError`로 바꿉니다
//!
//! 전이 실패는 반드시 사용자에게 보여야 합니다.
//! 그래서 `TransitionFailed`는 백엔드가 알려준 이유를 메시지에 그대로 담습니다.
//! 상태는 바뀌었는데 재조회만 실패한 경우는 `ReloadFailed`(`reload_failed`)로 따로 알려서
//! 화면이 "적용 안 됨"과 "적용됨, 새로고침 필요"를 구분할 수 있게 합니다.

use axum::{
    http::StatusCode,                     // HTTP 상태 코드 (200, 404, 500 등)
    response::{IntoResponse, Response},   // Axum의 응답 변환 트레이트
    Json,                                 // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error;

use crate::models::{CurrentVersionMismatch, VersionOverflow};
use crate::services::TransitionError;
use crate::upstream::UpstreamError;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 현재 상태에서 허용되지 않는 전이 (HTTP 422)
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// 같은 버전에 대한 전이가 이미 진행 중 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 백엔드가 상태 업데이트를 거절했거나 응답하지 않음 (HTTP 502)
    /// 메시지는 그대로 사용자에게 보여줍니다.
    #[error("Transition failed: {0}")]
    TransitionFailed(String),

    /// 상태 변경은 반영됐지만 재조회가 실패함 (HTTP 502)
    #[error("Reload failed: {0}")]
    ReloadFailed(String),

    /// 그 외 백엔드 호출 오류 (HTTP 502)
    #[error("Upstream error: {0}")]
    Upstream(UpstreamError),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),
}

// #[from] 대신 직접 구현: 백엔드의 404는 우리 쪽 404로 바꿉니다.
impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound => AppError::NotFound,
            other => AppError::Upstream(other),
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::AlreadyInFlight { .. } => AppError::Conflict(err.to_string()),
            TransitionError::NotAllowed { .. } => AppError::InvalidTransition(err.to_string()),
            TransitionError::UnknownVersion { .. } => AppError::NotFound,
            TransitionError::Lookup(source) => AppError::from(source),
            TransitionError::UpdateFailed { .. } => AppError::TransitionFailed(err.to_string()),
            TransitionError::ReloadFailed { .. } => AppError::ReloadFailed(err.to_string()),
        }
    }
}

// 가장 큰 번호가 이미 u32 상한이면 요청한 자리로는 올릴 수 없습니다
impl From<VersionOverflow> for AppError {
    fn from(err: VersionOverflow) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

// "현재 버전은 정확히 하나" 규칙 위반은 백엔드 데이터 문제입니다.
impl From<CurrentVersionMismatch> for AppError {
    fn from(err: CurrentVersionMismatch) -> Self {
        AppError::Upstream(UpstreamError::Decode(err.to_string()))
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러는 실제 내용을 로그에만 기록하고, 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        // (status, code, message) 튜플
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::InvalidTransition(ref msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_transition", msg.clone())
            }
            AppError::Conflict(ref msg) => {
                (StatusCode::CONFLICT, "conflict", msg.clone())
            }
            AppError::TransitionFailed(ref msg) => {
                tracing::warn!("Transition failed: {}", msg);
                (StatusCode::BAD_GATEWAY, "transition_failed", msg.clone())
            }
            AppError::ReloadFailed(ref msg) => {
                tracing::warn!("Reload after transition failed: {}", msg);
                (StatusCode::BAD_GATEWAY, "reload_failed", msg.clone())
            }
            AppError::Upstream(ref e) => {
                tracing::error!("Upstream error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream_error",
                    "The document service could not complete the request".to_string(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "Resource not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
