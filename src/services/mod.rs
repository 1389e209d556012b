//! # 서비스 계층
//!
//! 라우트 핸들러가 사용하는 도메인 로직입니다.
//! - `lifecycle`: 상태 전이 테이블 (순수 조회)
//! - `executor`: 전이 실행기 (백엔드 호출 + 재조회)

pub mod executor;
pub mod lifecycle;

pub use executor::*;
pub use lifecycle::*;
