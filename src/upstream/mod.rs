//! # 업스트림(컴플라이언스 백엔드) 접근 계층
//!
//! 문서와 버전은 이 서버가 아니라 컴플라이언스 백엔드가 저장합니다.
//! 라우트 핸들러와 전이 실행기는 이 모듈의 [`DocumentBackend`] 트레이트를 통해서만
//! 백엔드에 접근합니다.
//!
//! 하위 모듈:
//! - `client`: reqwest 기반 HTTP 구현체 (`HttpBackend`)
//!
//! 트레이트로 분리해 두었기 때문에 테스트에서는 메모리 구현체로 바꿔 끼울 수 있습니다.

pub mod client;

pub use client::HttpBackend;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{DocumentSummary, DocumentVersion, DocumentWithHistory, NewVersion, StatusUpdate};

/// 백엔드 호출 실패
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// 연결 실패, 타임아웃 등 전송 계층 오류
    #[error("network error: {0}")]
    Network(String),

    /// 백엔드가 404를 돌려줌
    #[error("not found upstream")]
    NotFound,

    /// 그 외 2xx가 아닌 응답
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// 응답 본문을 해석할 수 없음
    #[error("invalid upstream response: {0}")]
    Decode(String),
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// 컴플라이언스 백엔드가 제공하는 문서 엔드포인트들
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn list_documents(&self) -> UpstreamResult<Vec<DocumentSummary>>;

    /// 문서 재조회: 문서 + 전체 버전 이력
    async fn fetch_document(&self, document_id: &str) -> UpstreamResult<DocumentWithHistory>;

    /// 상태 업데이트: `{version_id, new_status}`만 보냅니다
    async fn update_version_status(
        &self,
        document_id: &str,
        update: &StatusUpdate,
    ) -> UpstreamResult<()>;

    /// 새 버전 초안 생성 (백엔드가 `is_current`를 새 버전으로 옮김)
    async fn create_version(
        &self,
        document_id: &str,
        version: &NewVersion,
    ) -> UpstreamResult<DocumentVersion>;
}
