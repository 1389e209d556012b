//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok" }`
//!
//! 이 서버 프로세스의 생존 여부만 알려줍니다.
//! 컴플라이언스 백엔드에는 요청을 보내지 않으므로, 백엔드 장애와는 무관하게 200을 반환합니다.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
