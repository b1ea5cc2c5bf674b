//! 远程访问模块
//!
//! 该模块定义了实体与远程 API 交互时依赖的抽象。
//! 实体本身从不直接发起 HTTP 请求，而是通过注入的 `RemoteAccessor` 完成。

use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncSeek};

use crate::error::Result;

pub mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpAccessor;

/// 请求的查询参数列表，按插入顺序发送。
pub type QueryParams<'a> = [(&'a str, String)];

/// 定义了访问远程曲库 API 所需的通用接口。
#[async_trait]
pub trait RemoteAccessor: Send + Sync {
    ///
    /// 对指定的版本化路径发起一个 GET 请求，并返回解码后的 JSON。
    ///
    /// # 参数
    /// * `path` - 以 `/v1/` 开头的请求路径。
    /// * `params` - 查询参数。调用方负责附加 `countryCode`。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含响应体对应的 `serde_json::Value`。
    /// 传输层的错误（超时、HTTP 错误状态码等）原样返回。
    ///
    async fn get(&self, path: &str, params: &QueryParams<'_>) -> Result<Value>;
}

/// 一个支持随机访问的远程文件。
pub trait SeekableFile: AsyncRead + AsyncSeek + Send + Unpin {
    /// 文件名。
    fn name(&self) -> &str;
}

/// 按 URL 打开可随机访问文件的工厂。
///
/// 这是一项可选能力：只有调用方向 `Session` 注入了工厂时，
/// `Track::get_file` 和 `Cover::get_file` 才可用。
#[async_trait]
pub trait SeekableFileFactory: Send + Sync {
    /// 为给定的资源 URL 打开一个文件。
    async fn open(&self, url: &str, filename: &str) -> Result<Box<dyn SeekableFile>>;
}
