//! 통합 테스트 공용: 메모리 기반 `DocumentBackend`와 픽스처

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::{Notify, Semaphore};

use cordocs::models::*;
use cordocs::upstream::{DocumentBackend, UpstreamError, UpstreamResult};

/// 실제 백엔드처럼 동작하는 메모리 구현체.
///
/// - 상태 업데이트는 지정된 버전의 `status`만 바꿉니다
/// - 새 버전은 draft로 추가되고 `is_current`가 새 버전으로 넘어갑니다
/// - 실패 주입, 업데이트/조회 보류(gate) 지원
#[derive(Default)]
pub struct InMemoryBackend {
    documents: Mutex<HashMap<String, DocumentWithHistory>>,
    pub update_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
    fail_updates: Mutex<Option<(u16, String)>>,
    fail_fetches_after_update: Mutex<bool>,
    gate: Mutex<Option<Arc<Semaphore>>>,
    fetch_gate: Mutex<Option<Arc<Semaphore>>>,
    pub update_started: Notify,
    pub fetch_started: Notify,
}

pub fn ts() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 14, 30, 0).unwrap()
}

pub fn version(id: &str, document_id: &str, number: &str, status: DocumentStatus, is_current: bool) -> DocumentVersion {
    DocumentVersion {
        id: id.to_string(),
        document_id: document_id.to_string(),
        version_number: number.parse().unwrap(),
        status,
        is_current,
        file_reference: Some(format!("files/{document_id}/{number}.pdf")),
        change_summary: None,
        created_at: ts(),
        prepared_at: None,
        reviewed_at: None,
        approved_at: None,
        published_at: None,
    }
}

impl InMemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, id: &str, title: &str, versions: Vec<DocumentVersion>) {
        let doc = DocumentWithHistory {
            document: Document {
                id: id.to_string(),
                title: title.to_string(),
                document_number: Some(format!("HS-{}", id.to_uppercase())),
                category: Some("Policy".to_string()),
                created_at: ts(),
                updated_at: ts(),
            },
            versions,
        };
        self.documents.lock().unwrap().insert(id.to_string(), doc);
    }

    /// 문서 하나에 버전 하나(현재 버전)를 넣습니다
    pub fn with_single_version(id: &str, status: DocumentStatus) -> Arc<Self> {
        let backend = Self::new();
        backend.insert(id, "Fall Protection Program", vec![version("ver-1", id, "1.0", status, true)]);
        backend
    }

    pub fn snapshot(&self, id: &str) -> DocumentWithHistory {
        self.documents.lock().unwrap().get(id).cloned().unwrap()
    }

    pub fn fail_updates_with(&self, status: u16, message: &str) {
        *self.fail_updates.lock().unwrap() = Some((status, message.to_string()));
    }

    pub fn fail_reloads_after_update(&self) {
        *self.fail_fetches_after_update.lock().unwrap() = true;
    }

    /// 업데이트가 semaphore 허가를 받을 때까지 멈추게 합니다
    pub fn hold_updates(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// 문서 조회가 semaphore 허가를 받을 때까지 멈추게 합니다
    pub fn hold_fetches(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.fetch_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn updates(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentBackend for InMemoryBackend {
    async fn list_documents(&self) -> UpstreamResult<Vec<DocumentSummary>> {
        let documents = self.documents.lock().unwrap();
        let mut rows: Vec<DocumentSummary> = documents
            .values()
            .map(|doc| {
                let current = doc.versions.iter().find(|v| v.is_current);
                DocumentSummary {
                    id: doc.document.id.clone(),
                    title: doc.document.title.clone(),
                    document_number: doc.document.document_number.clone(),
                    category: doc.document.category.clone(),
                    current_version: current.map(|v| v.version_number),
                    current_status: current.map(|v| v.status),
                    updated_at: doc.document.updated_at,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rows)
    }

    async fn fetch_document(&self, document_id: &str) -> UpstreamResult<DocumentWithHistory> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_started.notify_one();

        let gate = self.fetch_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await.unwrap();
        }

        if *self.fail_fetches_after_update.lock().unwrap() && self.updates() > 0 {
            return Err(UpstreamError::Network("connection reset".into()));
        }
        self.documents
            .lock()
            .unwrap()
            .get(document_id)
            .cloned()
            .ok_or(UpstreamError::NotFound)
    }

    async fn update_version_status(
        &self,
        document_id: &str,
        update: &StatusUpdate,
    ) -> UpstreamResult<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.update_started.notify_one();

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            let _permit = gate.acquire().await.unwrap();
        }

        if let Some((status, message)) = self.fail_updates.lock().unwrap().clone() {
            return Err(UpstreamError::Status { status, message });
        }

        let mut documents = self.documents.lock().unwrap();
        let doc = documents.get_mut(document_id).ok_or(UpstreamError::NotFound)?;
        let version = doc
            .versions
            .iter_mut()
            .find(|v| v.id == update.version_id)
            .ok_or(UpstreamError::NotFound)?;
        version.status = update.new_status;
        if update.new_status == DocumentStatus::Approved {
            version.approved_at = Some(ts());
        }
        Ok(())
    }

    async fn create_version(
        &self,
        document_id: &str,
        new_version: &NewVersion,
    ) -> UpstreamResult<DocumentVersion> {
        let mut documents = self.documents.lock().unwrap();
        let doc = documents.get_mut(document_id).ok_or(UpstreamError::NotFound)?;
        for existing in doc.versions.iter_mut() {
            existing.is_current = false;
        }
        let mut created = version(
            &format!("ver-{}", doc.versions.len() + 1),
            document_id,
            &new_version.version_number.to_string(),
            DocumentStatus::Draft,
            true,
        );
        created.file_reference = new_version.file_reference.clone();
        created.change_summary = new_version.change_summary.clone();
        doc.versions.push(created.clone());
        Ok(created)
    }
}
