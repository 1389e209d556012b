use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DocumentStatus;

/// `major.minor` 형식의 문서 버전 번호.
///
/// JSON에서는 `"1.2"` 문자열로 주고받습니다.
/// 필드 순서(major, minor) 그대로 derive한 `Ord`가 숫자 비교가 되므로 `1.10 > 1.9`입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionNumber {
    pub major: u32,
    pub minor: u32,
}

impl VersionNumber {
    /// 첫 버전 (1.0)
    pub const FIRST: VersionNumber = VersionNumber { major: 1, minor: 0 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// minor를 하나 올립니다. `u32` 범위를 넘으면 `None`
    pub fn next_minor(self) -> Option<Self> {
        Some(Self::new(self.major, self.minor.checked_add(1)?))
    }

    /// major를 올리고 minor는 0으로
    pub fn next_major(self) -> Option<Self> {
        Some(Self::new(self.major.checked_add(1)?, 0))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version number {0:?}: expected \"major.minor\"")]
pub struct InvalidVersionNumber(pub String);

impl FromStr for VersionNumber {
    type Err = InvalidVersionNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidVersionNumber(s.to_string());

        let (major, minor) = s.split_once('.').ok_or_else(invalid)?;
        // "+1" 같은 부호 표기는 u32::parse가 받아주므로 숫자만 허용
        let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(major) || !is_digits(minor) {
            return Err(invalid());
        }

        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for VersionNumber {
    type Error = InvalidVersionNumber;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionNumber> for String {
    fn from(value: VersionNumber) -> Self {
        value.to_string()
    }
}

/// 가장 큰 버전 번호가 이미 상한이라 더 올릴 수 없음
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot draft a {bump} version after {latest}: version number out of range")]
pub struct VersionOverflow {
    pub latest: VersionNumber,
    pub bump: VersionBump,
}

/// 새 버전 초안을 만들 때 올릴 자리
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    #[default]
    Minor,
    Major,
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        })
    }
}

impl VersionBump {
    /// 기존 버전 중 가장 큰 번호 다음 번호. 버전이 하나도 없으면 1.0
    pub fn next_after<'a, I>(self, existing: I) -> Result<VersionNumber, VersionOverflow>
    where
        I: IntoIterator<Item = &'a VersionNumber>,
    {
        let Some(&latest) = existing.into_iter().max() else {
            return Ok(VersionNumber::FIRST);
        };
        let next = match self {
            VersionBump::Minor => latest.next_minor(),
            VersionBump::Major => latest.next_major(),
        };
        next.ok_or(VersionOverflow { latest, bump: self })
    }
}

/// 문서의 한 버전 (스냅샷)
///
/// 상태(`status`)는 전이 실행기만 바꾸고, 새 버전은 항상 새 행으로 만들어집니다.
/// 삭제되지 않으며, 새 버전이 생기면 `is_current`가 그쪽으로 넘어갑니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVersion {
    pub id: String,
    pub document_id: String,
    pub version_number: VersionNumber,
    pub status: DocumentStatus,
    pub is_current: bool,
    /// 파일 저장소의 참조 (백엔드가 소유, 여기서는 해석하지 않음)
    #[serde(default)]
    pub file_reference: Option<String>,
    #[serde(default)]
    pub change_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    // 감사 타임스탬프: 값은 백엔드가 채웁니다
    #[serde(default)]
    pub prepared_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// 상태 변경 요청 본문 (업스트림 상태 업데이트 엔드포인트)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub version_id: String,
    pub new_status: DocumentStatus,
}

/// 새 버전 초안 생성 요청 (업스트림으로 전달)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVersion {
    pub version_number: VersionNumber,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_summary: Option<String>,
}

/// `POST /documents/{id}/versions` 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateVersionRequest {
    #[serde(default)]
    pub bump: VersionBump,
    pub file_reference: Option<String>,
    pub change_summary: Option<String>,
}

/// `POST /documents/{id}/versions/{version_id}/transitions` 요청 본문
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub target_status: DocumentStatus,
}
