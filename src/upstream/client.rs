//! # 컴플라이언스 백엔드 HTTP 클라이언트
//!
//! [`DocumentBackend`]를 reqwest로 구현합니다.
//! 모든 요청에 `X-Request-Id`와 (설정된 경우) Bearer 키를 붙이고,
//! 응답 상태 코드를 [`UpstreamError`]로 바꿉니다.
//!
//! 문서 ID는 항상 경로 세그먼트 하나로 인코딩합니다.
//! `/`나 `..`가 들어 있어도 다른 백엔드 경로로 새어 나가지 않습니다.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};

use super::{DocumentBackend, UpstreamError, UpstreamResult};
use crate::models::{DocumentSummary, DocumentVersion, DocumentWithHistory, NewVersion, StatusUpdate};

/// reqwest로 컴플라이언스 백엔드를 호출하는 [`DocumentBackend`] 구현체
#[derive(Clone)]
pub struct HttpBackend {
    http_client: Client,
    base_url: Url,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ListDocumentsResponse {
    documents: Vec<DocumentSummary>,
}

impl HttpBackend {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> UpstreamResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let parsed = Url::parse(base_url)
            .map_err(|e| UpstreamError::Network(format!("invalid upstream url {base_url:?}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(UpstreamError::Network(format!(
                "upstream url {base_url:?} cannot carry a path"
            )));
        }

        Ok(Self {
            http_client,
            base_url: parsed,
            api_key,
        })
    }

    /// base URL 뒤에 세그먼트를 하나씩 붙입니다. 각 세그먼트 안의 `/`, `%` 등은 인코딩됩니다.
    fn url(&self, segments: &[&str]) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Network(format!("upstream url {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `/documents/{id}[/tail]`
    ///
    /// `.`과 `..`는 url 크레이트가 세그먼트로 붙이지 않고 건너뛰므로 문서 ID로 받지 않습니다.
    fn document_url(&self, document_id: &str, tail: Option<&str>) -> UpstreamResult<Url> {
        if matches!(document_id, "" | "." | "..") {
            return Err(UpstreamError::NotFound);
        }
        match tail {
            Some(tail) => self.url(&["documents", document_id, tail]),
            None => self.url(&["documents", document_id]),
        }
    }

    /// 공통 헤더(인증, 요청 ID)를 붙여 요청을 보냅니다
    async fn send(&self, request: RequestBuilder) -> UpstreamResult<Response> {
        let request_id = uuid::Uuid::now_v7().to_string();
        let mut request = request.header("X-Request-Id", &request_id);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(%request_id, "upstream request failed: {}", e);
            UpstreamError::Network(e.to_string())
        })?;

        let status = response.status();
        tracing::debug!(%request_id, status = status.as_u16(), "upstream responded");

        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound);
        }

        let body = response.text().await.unwrap_or_default();
        Err(UpstreamError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> UpstreamResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

/// 백엔드 에러 본문에서 사람이 읽을 메시지를 꺼냅니다.
/// `{"error":{"message":..}}`, `{"error":".."}`, `{"message":..}` 순서로 찾고,
/// 없으면 본문 그대로 씁니다.
fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let found = parsed.as_ref().and_then(|v| {
        v.pointer("/error/message")
            .or_else(|| v.get("error").filter(|e| e.is_string()))
            .or_else(|| v.get("message"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
    });

    match found {
        Some(message) => message,
        None if body.trim().is_empty() => "empty response body".to_string(),
        None => body.trim().to_string(),
    }
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    async fn list_documents(&self) -> UpstreamResult<Vec<DocumentSummary>> {
        let response = self.send(self.http_client.get(self.url(&["documents"])?)).await?;
        let list: ListDocumentsResponse = Self::json(response).await?;
        Ok(list.documents)
    }

    async fn fetch_document(&self, document_id: &str) -> UpstreamResult<DocumentWithHistory> {
        let url = self.document_url(document_id, None)?;
        let response = self.send(self.http_client.get(url)).await?;
        Self::json(response).await
    }

    async fn update_version_status(
        &self,
        document_id: &str,
        update: &StatusUpdate,
    ) -> UpstreamResult<()> {
        let url = self.document_url(document_id, Some("status"))?;
        // 성공이면 본문은 보지 않습니다. 최신 상태는 재조회로 가져옵니다.
        self.send(self.http_client.post(url).json(update)).await?;
        Ok(())
    }

    async fn create_version(
        &self,
        document_id: &str,
        version: &NewVersion,
    ) -> UpstreamResult<DocumentVersion> {
        let url = self.document_url(document_id, Some("versions"))?;
        let response = self.send(self.http_client.post(url).json(version)).await?;
        Self::json(response).await
    }
}
