//! # 문서 상태(Status) 어휘
//!
//! 문서 버전의 라이프사이클 단계를 나타내는 열거형과,
//! 화면에서 상태 배지/액션 버튼에 쓰는 색상 태그를 정의합니다.
//!
//! 문자열 키로 색상/라벨을 찾는 대신 `match`로 처리하므로,
//! 새 상태를 추가하면 처리하지 않은 곳이 컴파일 에러로 드러납니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 문서 버전의 라이프사이클 상태
///
/// JSON에서는 `"pending_review"`처럼 snake_case 문자열로 직렬화됩니다.
/// 알 수 없는 문자열은 역직렬화 단계에서 거부됩니다 (기본값으로 대체하지 않음).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    PendingReview,
    UnderReview,
    Approved,
    Active,
    UnderRevision,
    Obsolete,
    Archived,
}

impl DocumentStatus {
    /// 모든 상태 (라이프사이클 순서)
    pub const ALL: [DocumentStatus; 8] = [
        DocumentStatus::Draft,
        DocumentStatus::PendingReview,
        DocumentStatus::UnderReview,
        DocumentStatus::Approved,
        DocumentStatus::Active,
        DocumentStatus::UnderRevision,
        DocumentStatus::Obsolete,
        DocumentStatus::Archived,
    ];

    /// 새 버전이 만들어질 때의 상태
    pub const INITIAL: DocumentStatus = DocumentStatus::Draft;

    /// 와이어(JSON, 업스트림 API)에서 쓰는 문자열
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingReview => "pending_review",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Active => "active",
            Self::UnderRevision => "under_revision",
            Self::Obsolete => "obsolete",
            Self::Archived => "archived",
        }
    }

    /// 사람이 읽는 라벨 (상태 배지 텍스트)
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::PendingReview => "Pending Review",
            Self::UnderReview => "Under Review",
            Self::Approved => "Approved",
            Self::Active => "Active",
            Self::UnderRevision => "Under Revision",
            Self::Obsolete => "Obsolete",
            Self::Archived => "Archived",
        }
    }

    /// 상태 배지 색상
    pub fn badge_color(self) -> ColorTag {
        match self {
            Self::Draft => ColorTag::Gray,
            Self::PendingReview => ColorTag::Yellow,
            Self::UnderReview => ColorTag::Purple,
            Self::Approved => ColorTag::Blue,
            Self::Active => ColorTag::Green,
            Self::UnderRevision => ColorTag::Orange,
            Self::Obsolete => ColorTag::Red,
            Self::Archived => ColorTag::Gray,
        }
    }

    /// 더 이상 나가는 전이가 없는 종료 상태인지
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Obsolete | Self::Archived)
    }

    /// 목록/상세 화면에 붙는 상태 배지
    pub fn badge(self) -> StatusBadge {
        StatusBadge {
            status: self,
            label: self.label(),
            color: self.badge_color(),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 알 수 없는 상태 문자열
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown document status: {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for DocumentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// UI 색상 태그 (버튼/배지)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Blue,
    Purple,
    Green,
    Gray,
    Yellow,
    Orange,
    Red,
}

/// 상태 + 라벨 + 색상을 묶은 배지 표현
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub status: DocumentStatus,
    pub label: &'static str,
    pub color: ColorTag,
}
