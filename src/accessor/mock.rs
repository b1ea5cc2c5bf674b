//! 供单元测试使用的 `RemoteAccessor` 替身。

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{QueryParams, RemoteAccessor};
use crate::error::{Result, TidalError};

type Handler = dyn Fn(&str, &[(String, String)]) -> Option<Value> + Send + Sync;
type Predicate = dyn Fn(&str, &[(String, String)]) -> bool + Send + Sync;

/// 一次被记录下来的请求。
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl RecordedCall {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// 根据闭包生成响应，并记录所有收到的请求。
pub(crate) struct MockAccessor {
    handler: Box<Handler>,
    stall: Option<Box<Predicate>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockAccessor {
    pub fn new(
        handler: impl Fn(&str, &[(String, String)]) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            handler: Box::new(handler),
            stall: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 匹配 `predicate` 的请求永远不会完成，用于测试取消。
    pub fn stalling_on(
        mut self,
        predicate: impl Fn(&str, &[(String, String)]) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.stall = Some(Box::new(predicate));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls().iter().filter(|c| c.path == path).count()
    }
}

#[async_trait]
impl RemoteAccessor for MockAccessor {
    async fn get(&self, path: &str, params: &QueryParams<'_>) -> Result<Value> {
        let params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        let stalled = self.stall.as_ref().is_some_and(|stall| stall(path, &params));
        let response = (self.handler)(path, &params);
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            params,
        });
        if stalled {
            return std::future::pending().await;
        }
        response.ok_or_else(|| TidalError::ApiError(path.to_string()))
    }
}
