use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::config::Config;
use crate::infrastructure::error::ReviewError;
use crate::models::review::{ApiErrorBody, HealthResponse, ReviewRequest, ReviewResult};

/// 审查服务的 HTTP 客户端
///
/// 只封装本核心用到的两个端点：`POST /api/review` 与 `GET /health`。
/// 超时由传输层统一控制；调用方放弃等待（future 被 drop）即中止请求。
pub struct AnalysisClient {
    http: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(config: &Config) -> Result<Self, ReviewError> {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("ai-review/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ReviewError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 提交一次完整审查，等待单个响应
    pub async fn review(&self, request: &ReviewRequest) -> Result<ReviewResult, ReviewError> {
        let url = format!("{}/api/review", self.base_url);
        tracing::debug!(url = %url, language = request.language.as_str(), "提交审查请求");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ReviewError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // 失败响应优先取结构化的 detail 字段
            if let Ok(err_body) = serde_json::from_str::<ApiErrorBody>(&body) {
                return Err(ReviewError::service(status.as_u16(), err_body.detail));
            }
            return Err(ReviewError::transport(format!("HTTP error: {}", status)));
        }

        response
            .json::<ReviewResult>()
            .await
            .map_err(|e| ReviewError::transport(format!("Invalid response body: {}", e)))
    }

    /// 一次性的连通性探测，只用于驱动状态指示
    pub async fn health(&self) -> Result<HealthResponse, ReviewError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ReviewError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReviewError::transport(format!("HTTP error: {}", status)));
        }

        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| ReviewError::transport(format!("Invalid response body: {}", e)))
    }
}
