//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `status`: 문서 라이프사이클 상태와 색상 태그
//! - `version`: 문서 버전, 버전 번호(major.minor), 상태 변경 요청
//! - `document`: 문서, 버전 이력, 목록 요약
//!
//! 데이터 자체는 컴플라이언스 백엔드가 저장하며,
//! 이 구조체들은 백엔드 API와 주고받는 JSON 형태를 그대로 표현합니다.
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Document`처럼 짧게 접근합니다.

pub mod document;
pub mod status;
pub mod version;

pub use document::*;
pub use status::*;
pub use version::*;
