//! 定义了整个 `tidal-helper` 库的错误类型 `TidalError`。

use std::io;
use thiserror::Error;

/// `tidal-helper` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum TidalError {
    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// 没有任何实体类型能从该 URL 中提取出 ID
    #[error("无效的 URL: '{0}'")]
    InvalidUrl(String),

    /// 该类型不支持此操作（例如没有声明 URL 标签的类型被用于解析 URL）
    #[error("不支持的操作: {0}")]
    UnsupportedOperation(String),

    /// 枚举值不在已知的取值范围内
    #[error("未知的 {kind} 取值: '{value}'")]
    InvalidEnumValue {
        /// 枚举的名称，例如 "AudioQuality"。
        kind: &'static str,
        /// 服务端返回的原始字符串。
        value: String,
    },

    /// 播放清单不是有效的 Base64 编码 JSON
    #[error("播放清单解码失败: {0}")]
    Decode(String),

    /// 播放清单中没有任何可用的流地址
    #[error("曲目 {0} 没有可用的流地址")]
    NoStreamAvailable(String),

    /// 已加载的属性中缺少必需的字段
    #[error("缺少字段: '{0}'")]
    MissingField(&'static str),

    /// 封面尺寸不在服务支持的范围内
    #[error("不支持的封面尺寸: {0}x{1}")]
    UnsupportedResolution(u32, u32),

    /// 客户端配置无法用于构造请求
    #[error("配置无效: {0}")]
    InvalidConfig(String),

    /// API 返回错误或空数据
    #[error("API 为 `{0}` 返回了错误或空数据")]
    ApiError(String),
}

/// `TidalError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, TidalError>;
