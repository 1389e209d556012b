//! # cordocs
//!
//! COR 안전관리 문서의 라이프사이클 게이트웨이.
//! 문서 상태 어휘, 전이 테이블, 전이 실행기를 가지고,
//! 문서 저장은 컴플라이언스 백엔드에 HTTP로 위임합니다.
//!
//! 바이너리 진입점은 `main.rs`이고, 통합 테스트(`tests/`)에서 라우터와 모델을
//! 쓸 수 있도록 모듈은 이 라이브러리 크레이트에 선언합니다.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod upstream;
