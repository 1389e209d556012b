//! # 전이 실행기 (Transition Executor)
//!
//! 선택된 전이를 특정 문서 버전에 적용합니다.
//!
//! 동작 순서:
//! 1. 해당 버전을 "처리 중(in-flight)"으로 표시. 이미 처리 중이면 즉시 거절
//! 2. 백엔드에 `{version_id, new_status}` 상태 업데이트 요청 1회
//! 3. 성공하면 문서 전체를 다시 조회해서 반환 (낙관적 업데이트 없음)
//! 4. 실패하면 에러를 그대로 호출자에게 돌려줌 (재시도/롤백 없음)
//!
//! 어떤 경우든 함수가 끝나면 처리 중 표시가 풀리므로, 실패한 전이는 다시 시도할 수 있습니다.
//!
//! `apply`는 전이가 테이블상 합법인지 검사하지 않습니다.
//! 외부 요청은 `apply_checked`를 씁니다: 처리 중 표시를 잡은 **뒤에** 문서를 조회해서
//! 테이블과 대조하므로, 검사와 업데이트 사이에 같은 버전의 다른 전이가 끼어들 수 없습니다.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use crate::models::{DocumentStatus, DocumentWithHistory, StatusUpdate};
use crate::services::TransitionTable;
use crate::upstream::{DocumentBackend, UpstreamError};

#[derive(Debug, Error)]
pub enum TransitionError {
    /// 같은 버전에 대한 전이가 이미 진행 중
    #[error("a transition for version {version_id} is already in progress")]
    AlreadyInFlight { version_id: String },

    /// 상태 업데이트 요청이 실패함. 상태는 바뀌지 않았습니다.
    #[error("failed to move version to {target}: {source}")]
    UpdateFailed {
        target: DocumentStatus,
        #[source]
        source: UpstreamError,
    },

    /// 상태는 바뀌었지만 재조회가 실패함
    #[error("transition applied but reloading the document failed: {source}")]
    ReloadFailed {
        #[source]
        source: UpstreamError,
    },

    /// 검사용 조회 실패. 업데이트는 보내지 않았습니다.
    #[error("could not load the document to check the transition: {0}")]
    Lookup(#[source] UpstreamError),

    #[error("document has no version {version_id}")]
    UnknownVersion { version_id: String },

    /// 현재 상태에서 허용되지 않는 대상
    #[error("cannot move a {from} version to {target} (allowed: [{}])", join_statuses(.allowed))]
    NotAllowed {
        from: DocumentStatus,
        target: DocumentStatus,
        allowed: Vec<DocumentStatus>,
    },
}

fn join_statuses(statuses: &[DocumentStatus]) -> String {
    statuses
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 전이 실행기
///
/// `Clone`해도 같은 백엔드와 같은 처리 중 목록을 공유합니다 (내부가 `Arc`).
#[derive(Clone)]
pub struct TransitionExecutor {
    backend: Arc<dyn DocumentBackend>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

/// 처리 중 표시. drop될 때 목록에서 버전을 지웁니다.
struct InFlightGuard {
    in_flight: Arc<Mutex<HashSet<String>>>,
    version_id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock(&self.in_flight).remove(&self.version_id);
    }
}

// HashSet 조작 중에는 패닉이 나지 않으므로 poison 상태여도 안의 값은 그대로 씁니다
fn lock(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    set.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl TransitionExecutor {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            backend,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// 해당 버전의 전이가 진행 중인지 (화면의 "Processing..." 상태)
    pub fn is_processing(&self, version_id: &str) -> bool {
        lock(&self.in_flight).contains(version_id)
    }

    fn begin(&self, version_id: &str) -> Result<InFlightGuard, TransitionError> {
        let mut set = lock(&self.in_flight);
        if !set.insert(version_id.to_string()) {
            return Err(TransitionError::AlreadyInFlight {
                version_id: version_id.to_string(),
            });
        }
        Ok(InFlightGuard {
            in_flight: Arc::clone(&self.in_flight),
            version_id: version_id.to_string(),
        })
    }

    /// 전이를 적용하고, 성공하면 다시 조회한 문서를 돌려줍니다.
    pub async fn apply(
        &self,
        document_id: &str,
        version_id: &str,
        target: DocumentStatus,
    ) -> Result<DocumentWithHistory, TransitionError> {
        let _guard = self.begin(version_id)?;
        self.update_and_reload(document_id, version_id, target).await
    }

    /// 처리 중 표시를 잡은 상태에서 버전의 현재 상태를 조회해 `table`과 대조한 뒤 적용합니다.
    ///
    /// 허용되지 않으면 백엔드에 업데이트를 보내지 않습니다.
    /// 종료 상태(obsolete, archived)에서는 항상 `NotAllowed`입니다.
    pub async fn apply_checked(
        &self,
        table: &TransitionTable,
        document_id: &str,
        version_id: &str,
        target: DocumentStatus,
    ) -> Result<DocumentWithHistory, TransitionError> {
        let _guard = self.begin(version_id)?;

        let history = self
            .backend
            .fetch_document(document_id)
            .await
            .map_err(TransitionError::Lookup)?;
        let from = history
            .version(version_id)
            .ok_or_else(|| TransitionError::UnknownVersion {
                version_id: version_id.to_string(),
            })?
            .status;

        if !table.allows(from, target) {
            tracing::debug!(document_id, version_id, %from, %target, "transition rejected by table");
            return Err(TransitionError::NotAllowed {
                from,
                target,
                allowed: table.available(from).iter().map(|t| t.target).collect(),
            });
        }

        self.update_and_reload(document_id, version_id, target).await
    }

    // 호출자가 처리 중 표시를 잡고 있어야 합니다
    async fn update_and_reload(
        &self,
        document_id: &str,
        version_id: &str,
        target: DocumentStatus,
    ) -> Result<DocumentWithHistory, TransitionError> {
        let update = StatusUpdate {
            version_id: version_id.to_string(),
            new_status: target,
        };

        if let Err(source) = self.backend.update_version_status(document_id, &update).await {
            tracing::warn!(document_id, version_id, %target, "status update failed: {}", source);
            return Err(TransitionError::UpdateFailed { target, source });
        }
        tracing::info!(document_id, version_id, %target, "document version status updated");

        self.backend
            .fetch_document(document_id)
            .await
            .map_err(|source| {
                tracing::warn!(document_id, "reload after transition failed: {}", source);
                TransitionError::ReloadFailed { source }
            })
    }
}
