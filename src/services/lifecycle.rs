//! # 문서 라이프사이클 전이 테이블
//!
//! 현재 상태에서 이동할 수 있는 다음 상태 목록(액션 버튼)을 정의합니다.
//!
//! | 현재 상태 | 가능한 전이 (버튼 라벨) |
//! |---|---|
//! | draft | pending_review ("Submit for Review") |
//! | pending_review | under_review ("Start Review"), draft ("Return to Draft") |
//! | under_review | approved ("Approve"), draft ("Return to Draft") |
//! | approved | active ("Publish"), draft ("Return to Draft") |
//! | active | under_revision ("Start Revision"), obsolete ("Mark Obsolete") |
//! | under_revision | pending_review ("Submit for Review") |
//! | obsolete | 없음 (종료 상태) |
//! | archived | 없음 (종료 상태) |
//!
//! 테이블은 서버 시작 시 한 번 만들어 `AppState`를 통해 공유합니다.
//! 행은 `match`로 정의되어 있어서 상태가 추가되면 컴파일러가 누락을 알려줍니다.
//!
//! 참고: 어떤 전이도 `archived`로 가지 않습니다. 의도된 것인지 제품 쪽 확인이 필요해서
//! 전이를 임의로 추가하지 않고, [`TransitionTable::unreachable_statuses`]로 드러내기만 합니다.

use serde::Serialize;

use crate::models::{ColorTag, DocumentStatus};
use DocumentStatus::*;

/// 하나의 전이 = 화면의 액션 버튼 하나
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub label: &'static str,
    pub target: DocumentStatus,
    pub color: ColorTag,
}

const fn to(target: DocumentStatus, label: &'static str, color: ColorTag) -> Transition {
    Transition { label, target, color }
}

const FROM_DRAFT: &[Transition] = &[to(PendingReview, "Submit for Review", ColorTag::Blue)];
const FROM_PENDING_REVIEW: &[Transition] = &[
    to(UnderReview, "Start Review", ColorTag::Purple),
    to(Draft, "Return to Draft", ColorTag::Gray),
];
const FROM_UNDER_REVIEW: &[Transition] = &[
    to(Approved, "Approve", ColorTag::Green),
    to(Draft, "Return to Draft", ColorTag::Gray),
];
const FROM_APPROVED: &[Transition] = &[
    to(Active, "Publish", ColorTag::Green),
    to(Draft, "Return to Draft", ColorTag::Gray),
];
const FROM_ACTIVE: &[Transition] = &[
    to(UnderRevision, "Start Revision", ColorTag::Orange),
    to(Obsolete, "Mark Obsolete", ColorTag::Red),
];
const FROM_UNDER_REVISION: &[Transition] =
    &[to(PendingReview, "Submit for Review", ColorTag::Blue)];

/// 상태 → 전이 목록 조회 테이블
///
/// 순수 조회만 하며 실패하지 않습니다. 종료 상태는 빈 슬라이스를 돌려줍니다.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    _private: (),
}

/// `GET /lifecycle` 응답의 한 행
#[derive(Debug, Clone, Serialize)]
pub struct TableEntry {
    pub status: DocumentStatus,
    pub label: &'static str,
    pub color: ColorTag,
    pub terminal: bool,
    pub transitions: &'static [Transition],
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 현재 상태에서 가능한 전이 목록 (화면 표시 순서)
    pub fn available(&self, from: DocumentStatus) -> &'static [Transition] {
        match from {
            Draft => FROM_DRAFT,
            PendingReview => FROM_PENDING_REVIEW,
            UnderReview => FROM_UNDER_REVIEW,
            Approved => FROM_APPROVED,
            Active => FROM_ACTIVE,
            UnderRevision => FROM_UNDER_REVISION,
            Obsolete | Archived => &[],
        }
    }

    pub fn find(&self, from: DocumentStatus, target: DocumentStatus) -> Option<&'static Transition> {
        self.available(from).iter().find(|t| t.target == target)
    }

    pub fn allows(&self, from: DocumentStatus, target: DocumentStatus) -> bool {
        self.find(from, target).is_some()
    }

    /// 어떤 전이의 대상도 아니고 초기 상태도 아닌 상태들.
    /// 현재 테이블에서는 `archived` 하나입니다.
    pub fn unreachable_statuses(&self) -> Vec<DocumentStatus> {
        DocumentStatus::ALL
            .into_iter()
            .filter(|&status| status != DocumentStatus::INITIAL)
            .filter(|&status| {
                !DocumentStatus::ALL
                    .into_iter()
                    .any(|from| self.allows(from, status))
            })
            .collect()
    }

    pub fn entries(&self) -> Vec<TableEntry> {
        DocumentStatus::ALL
            .into_iter()
            .map(|status| TableEntry {
                status,
                label: status.label(),
                color: status.badge_color(),
                terminal: status.is_terminal(),
                transitions: self.available(status),
            })
            .collect()
    }
}
