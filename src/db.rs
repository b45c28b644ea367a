use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::{config::ElasticsearchConfig, error::SearchError};

/// 按键读取文档的结果
///
/// `found` 为假时 `source` 为空；为真时 `source` 是文档原文，由调用方解码。
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GetResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_source")]
    pub source: Option<Value>,
}

/// 搜索引擎客户端能力 -- 只需按键读取与按键创建两个操作
///
/// 实现必须可以被多个并发请求共享（`Send + Sync`），并且在传输或服务端
/// 出错时返回 `Err`，而不是返回哨兵值。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn fetch_by_id(&self, index: &str, id: &str) -> Result<GetResponse, SearchError>;

    async fn create_document(
        &self,
        index: &str,
        id: &str,
        document: Value,
    ) -> Result<(), SearchError>;
}

// -- Elasticsearch 返回的错误体
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorCause,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorCause {
    Detailed {
        #[serde(rename = "type")]
        kind: String,
        reason: Option<String>,
    },
    Plain(String),
}

/// 基于 reqwest 的 Elasticsearch REST 客户端
///
/// `reqwest::Client` 内部维护连接池，克隆后共享同一个池，可安全并发使用。
#[derive(Debug, Clone)]
pub struct ElasticClient {
    http: Client,
    base_url: String,
}

impl ElasticClient {
    pub fn new(config: &ElasticsearchConfig) -> Result<Self, SearchError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url: config.address.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, index: &str, endpoint: &str, id: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, index, endpoint, id)
    }
}

#[async_trait]
impl SearchClient for ElasticClient {
    async fn fetch_by_id(&self, index: &str, id: &str) -> Result<GetResponse, SearchError> {
        let response = self.http.get(self.url(index, "_doc", id)).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(index, id, status = status.as_u16(), "fetched document");

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()));
        }

        // -- 文档不存在时 Elasticsearch 返回 404 且 found=false；索引不存在同样是 404，但属于错误
        if status == StatusCode::NOT_FOUND {
            if let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(&body) {
                if fields.get("found") == Some(&Value::Bool(false)) {
                    return Ok(GetResponse::default());
                }
            }
        }

        Err(server_error(status, &body))
    }

    async fn create_document(
        &self,
        index: &str,
        id: &str,
        document: Value,
    ) -> Result<(), SearchError> {
        let response = self
            .http
            .put(self.url(index, "_create", id))
            .json(&document)
            .send()
            .await?;
        let status = response.status();

        tracing::debug!(index, id, status = status.as_u16(), "created document");

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await?;
        Err(server_error(status, &body))
    }
}

// -- 将非 2xx 响应转为错误，尽量保留 Elasticsearch 给出的错误类型与原因
fn server_error(status: StatusCode, body: &str) -> SearchError {
    let (kind, reason) = match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: ErrorCause::Detailed { kind, reason },
        }) => {
            let reason = reason.unwrap_or_else(|| kind.clone());
            (kind, reason)
        }
        Ok(ErrorBody {
            error: ErrorCause::Plain(reason),
        }) => ("error".to_string(), reason),
        Err(_) => (
            status
                .canonical_reason()
                .unwrap_or("unknown")
                .to_lowercase()
                .replace(' ', "_"),
            body.to_string(),
        ),
    };

    SearchError::Server {
        status: status.as_u16(),
        kind,
        reason,
    }
}
