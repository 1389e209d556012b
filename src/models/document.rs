use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DocumentStatus, DocumentVersion, StatusBadge, VersionNumber};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    /// 문서 등록부 코드 (예: "HS-POL-001")
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 문서 + 전체 버전 이력. 업스트림 "문서 재조회" 엔드포인트의 응답입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentWithHistory {
    #[serde(flatten)]
    pub document: Document,
    #[serde(default)]
    pub versions: Vec<DocumentVersion>,
}

/// 이력 데이터가 "현재 버전은 정확히 하나" 규칙을 어긴 경우
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("document {document_id} has {count} current versions, expected exactly one")]
pub struct CurrentVersionMismatch {
    pub document_id: String,
    pub count: usize,
}

impl DocumentWithHistory {
    /// `is_current` 버전을 찾습니다.
    ///
    /// - 버전이 하나도 없으면 `Ok(None)`
    /// - 현재 버전이 정확히 하나면 `Ok(Some(..))`
    /// - 0개 또는 2개 이상이면 에러 (조용히 고치지 않고 그대로 보고)
    pub fn current_version(&self) -> Result<Option<&DocumentVersion>, CurrentVersionMismatch> {
        if self.versions.is_empty() {
            return Ok(None);
        }

        let mut current = self.versions.iter().filter(|v| v.is_current);
        match (current.next(), current.next()) {
            (Some(version), None) => Ok(Some(version)),
            _ => Err(CurrentVersionMismatch {
                document_id: self.document.id.clone(),
                count: self.versions.iter().filter(|v| v.is_current).count(),
            }),
        }
    }

    pub fn version(&self, version_id: &str) -> Option<&DocumentVersion> {
        self.versions.iter().find(|v| v.id == version_id)
    }

    pub fn version_numbers(&self) -> impl Iterator<Item = &VersionNumber> {
        self.versions.iter().map(|v| &v.version_number)
    }

    /// 버전 번호 오름차순 정렬 (1-대-다 이력은 버전 순서로 보여줍니다)
    pub fn sort_versions(&mut self) {
        self.versions.sort_by_key(|v| v.version_number);
    }
}

/// `GET /documents` 목록의 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub current_version: Option<VersionNumber>,
    #[serde(default)]
    pub current_status: Option<DocumentStatus>,
    pub updated_at: DateTime<Utc>,
}

/// 목록 응답용: 요약 + 상태 배지
#[derive(Debug, Clone, Serialize)]
pub struct DocumentListItem {
    #[serde(flatten)]
    pub summary: DocumentSummary,
    pub badge: Option<StatusBadge>,
}

impl From<DocumentSummary> for DocumentListItem {
    fn from(summary: DocumentSummary) -> Self {
        let badge = summary.current_status.map(DocumentStatus::badge);
        Self { summary, badge }
    }
}
