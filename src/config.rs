//! 负责处理客户端的持久化配置。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::error::Result;

const CONFIG_DIR_NAME: &str = "tidal-helper";
const CONFIG_FILE_NAME: &str = "config.json";

/// 默认的 API 根地址。
pub const DEFAULT_API_BASE_URL: &str = "https://api.tidal.com/";

/// 访问 TIDAL API 所需的客户端配置。
///
/// 令牌的获取（OAuth 登录、刷新）不在本库的职责范围内，
/// 调用方需要自行写入 `access_token`。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// API 根地址，所有请求路径都会拼接在它后面。
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// 客户端 ID，作为 `X-Tidal-Token` 请求头发送。
    pub client_id: String,
    /// 会话所属的国家/地区代码，每个请求都会携带。
    pub country_code: String,
    /// 令牌类型，通常是 "Bearer"。
    #[serde(default)]
    pub token_type: Option<String>,
    /// 访问令牌。
    #[serde(default)]
    pub access_token: Option<String>,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl ClientConfig {
    /// 使用默认的 API 地址创建一个未携带令牌的配置。
    pub fn new(client_id: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            api_base_url: default_api_base_url(),
            client_id: client_id.into(),
            country_code: country_code.into(),
            token_type: None,
            access_token: None,
        }
    }

    /// 组装 `Authorization` 请求头的值。没有令牌时返回 `None`。
    pub fn authorization(&self) -> Option<String> {
        self.access_token.as_ref().map(|token| {
            let token_type = self.token_type.as_deref().unwrap_or("Bearer");
            format!("{token_type} {token}")
        })
    }
}

/// 获取应用配置目录下指定文件的完整路径。
///
/// # 参数
/// * `filename` - 目标配置文件的名称，例如 "config.json"。
pub fn get_config_file_path(filename: &str) -> std::result::Result<PathBuf, std::io::Error> {
    if let Some(mut config_dir) = dirs::config_dir() {
        config_dir.push(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir)?;
        config_dir.push(filename);
        Ok(config_dir)
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "无法找到用户配置目录",
        ))
    }
}

/// 从默认位置加载客户端配置。
pub fn load_config() -> Result<ClientConfig> {
    let config_path = get_config_file_path(CONFIG_FILE_NAME)?;
    load_config_from(&config_path)
}

/// 从指定文件加载客户端配置。
pub fn load_config_from(path: &std::path::Path) -> Result<ClientConfig> {
    let content = fs::read_to_string(path)?;
    let config: ClientConfig = serde_json::from_str(&content)?;
    info!("已从 {} 加载配置 (countryCode: {})", path.display(), config.country_code);
    Ok(config)
}

/// 将客户端配置序列化为 JSON 并保存到默认位置。
pub fn save_config(config: &ClientConfig) -> Result<()> {
    let config_path = get_config_file_path(CONFIG_FILE_NAME)?;
    save_config_to(config, &config_path)
}

/// 将客户端配置序列化为 JSON 并保存到指定文件。
pub fn save_config_to(config: &ClientConfig, path: &std::path::Path) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)?;
    info!("配置已保存到 {}。", path.display());
    Ok(())
}
