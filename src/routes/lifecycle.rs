//! # 라이프사이클 테이블 조회
//!
//! ## 엔드포인트
//! - `GET /api/v1/lifecycle` → 상태별 라벨/색상/전이 목록 + 도달 불가능한 상태
//!
//! 프론트엔드가 상태 배지와 버튼을 그릴 때 같은 테이블을 쓰도록 그대로 내려줍니다.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::documents::AppState;

pub async fn get_lifecycle(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "statuses": state.table.entries(),
        "initial": crate::models::DocumentStatus::INITIAL,
        "unreachable": state.table.unreachable_statuses(),
    }))
}
