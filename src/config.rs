//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `UPSTREAM_URL`: 컴플라이언스 백엔드 API 주소 (필수)
//! - `UPSTREAM_API_KEY`: 백엔드 호출 시 붙이는 Bearer 키 (선택)
//! - `UPSTREAM_TIMEOUT_SECS`: 백엔드 요청 타임아웃 (기본값: 30초)
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 디렉토리 (기본값: "../frontend/dist")
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호

use std::env;
use std::time::Duration;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후, 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// 컴플라이언스 백엔드 기본 URL (예: "https://compliance.example.com/api")
    pub upstream_url: String,
    pub upstream_api_key: Option<String>,
    /// 응답이 없는 백엔드 때문에 버튼이 "Processing..."에 멈추지 않도록 하는 상한
    pub upstream_timeout: Duration,
    pub frontend_dist: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `UPSTREAM_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 나머지 설정은 기본값이 있어 환경변수가 없어도 동작합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Self::from_lookup(|key| env::var(key))
    }

    /// 값 조회 함수를 주입받는 버전 (테스트에서 프로세스 환경변수를 건드리지 않기 위함)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let timeout_secs = lookup("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(30);

        Ok(Self {
            upstream_url: lookup("UPSTREAM_URL")?, // 필수: 없으면 에러
            // 빈 문자열은 "키 없음"으로 취급
            upstream_api_key: lookup("UPSTREAM_API_KEY").ok().filter(|k| !k.is_empty()),
            upstream_timeout: Duration::from_secs(timeout_secs),
            frontend_dist: lookup("FRONTEND_DIST")
                .unwrap_or_else(|_| "../frontend/dist".to_string()),
            host: lookup("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000), // 파싱 실패 시 기본값
        })
    }
}
