//! 基于 `reqwest` 的 `RemoteAccessor` 实现。

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde_json::Value;

use super::{QueryParams, RemoteAccessor};
use crate::{
    config::ClientConfig,
    error::{Result, TidalError},
};

const CLIENT_TOKEN_HEADER: &str = "x-tidal-token";

/// 通过 HTTPS 访问 TIDAL API 的客户端。
///
/// 只负责拼接地址、附加认证请求头和解码 JSON，
/// 不做重试，也不会自动刷新令牌。
#[derive(Debug, Clone)]
pub struct HttpAccessor {
    http_client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl HttpAccessor {
    /// 根据客户端配置创建一个新的 `HttpAccessor`。
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let client_token = HeaderValue::from_str(&config.client_id)
            .map_err(|e| TidalError::InvalidConfig(format!("无法解析客户端 ID: {e}")))?;
        headers.insert(CLIENT_TOKEN_HEADER, client_token);

        if let Some(authorization) = config.authorization() {
            let mut value = HeaderValue::from_str(&authorization)
                .map_err(|e| TidalError::InvalidConfig(format!("无法解析访问令牌: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(Self {
            http_client: Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl RemoteAccessor for HttpAccessor {
    async fn get(&self, path: &str, params: &QueryParams<'_>) -> Result<Value> {
        let url = self.url_for(path);
        tracing::debug!("[Http] GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .headers(self.headers.clone())
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        let body = response.json::<Value>().await?;
        if body.is_null() {
            return Err(TidalError::ApiError(path.to_string()));
        }
        Ok(body)
    }
}
