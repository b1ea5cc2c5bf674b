//! 定义了所有曲库实体共享的标识符类型与惰性加载契约。

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Result, TidalError},
    resolver::url::id_from_url,
    session::Session,
};

/// 曲库对象的标识符。
///
/// 曲目和专辑使用数字 ID，歌单使用 UUID 字符串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// 数字 ID，例如 `79580198`。
    Numeric(u64),
    /// 字符串 ID，例如 `dcbab999-7523-4e2f-adf4-57d10fc17516`。
    Text(String),
}

impl EntityId {
    /// 返回可以安全拼接到请求路径中的形式。
    pub(crate) fn path_segment(&self) -> String {
        match self {
            Self::Numeric(id) => id.to_string(),
            Self::Text(id) => urlencoding::encode(id).into_owned(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        // 只有能原样还原的纯数字字符串才按数字 ID 处理，
        // 带前导零或超出 u64 范围时保留原文
        if id.bytes().all(|b| b.is_ascii_digit())
            && let Ok(numeric) = id.parse::<u64>()
            && numeric.to_string() == id
        {
            return Self::Numeric(numeric);
        }
        Self::Text(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// 定义了所有曲库实体需要实现的惰性加载契约。
///
/// 实体可以只凭一个 ID 构造出来（存根，不发起请求），
/// 之后通过 `reload` 从远程 API 填充自己的属性。
#[async_trait]
pub trait Entity: Sized + Send + Sync {
    /// 在 URL 中标识该类型的路径段，例如 `"track"`。
    ///
    /// 为 `None` 的类型无法从 URL 解析，也会被 `Resolver` 跳过。
    const URL_TAG: Option<&'static str> = None;

    /// 只凭 ID 构造一个未加载的存根，不发起任何请求。
    fn stub(session: Session, id: EntityId) -> Self;

    /// 实体的 ID。
    fn id(&self) -> &EntityId;

    /// 实体持有的会话。
    fn session(&self) -> &Session;

    /// 没有对应类型化字段的原始属性。
    fn extra(&self) -> &Map<String, Value>;

    /// 按服务端的键名读取一个原始属性。键不存在时返回 `None`。
    ///
    /// 只查找 `extra`，类型化字段（例如 `title`）不在此列，应通过对应的访问器读取。
    fn raw(&self, key: &str) -> Option<&Value> {
        self.extra().get(key)
    }

    /// 判断原始属性中是否存在某个键。类型化字段不在此列。
    fn contains(&self, key: &str) -> bool {
        self.extra().contains_key(key)
    }

    ///
    /// 从远程 API 重新获取并更新属性。
    ///
    /// 请求完成并解码成功之前不会修改任何属性，
    /// 因此被取消的 `reload` 不会留下部分合并的状态。
    ///
    async fn reload(&mut self) -> Result<()> {
        Err(TidalError::UnsupportedOperation(format!(
            "{} 没有实现 reload",
            std::any::type_name::<Self>()
        )))
    }

    /// 属性是否已经通过 `reload` 加载过。
    fn is_hydrated(&self) -> bool;

    /// 仅当实体还是存根时才加载。
    async fn ensure_hydrated(&mut self) -> Result<()> {
        if self.is_hydrated() {
            return Ok(());
        }
        self.reload().await
    }

    /// 构造存根并立即加载。
    async fn fetch(session: Session, id: EntityId) -> Result<Self> {
        let mut entity = Self::stub(session, id);
        entity.reload().await?;
        Ok(entity)
    }

    /// 使用该类型自己的 URL 标签从 URL 中提取 ID，然后加载实体。
    async fn from_url(session: Session, url: &str) -> Result<Self> {
        let tag = Self::URL_TAG.ok_or_else(|| {
            TidalError::UnsupportedOperation(format!(
                "{} 没有声明 URL 标签",
                std::any::type_name::<Self>()
            ))
        })?;
        let id = id_from_url(url, tag)?;
        Self::fetch(session, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_strings_become_numeric() {
        assert_eq!(EntityId::from("50096997"), EntityId::Numeric(50096997));
        assert_eq!(
            EntityId::from("dcbab999-7523-4e2f-adf4-57d10fc17516"),
            EntityId::Text("dcbab999-7523-4e2f-adf4-57d10fc17516".to_string())
        );
        assert_eq!(
            EntityId::from("99999999999999999999999"),
            EntityId::Text("99999999999999999999999".to_string())
        );
        assert_eq!(EntityId::from("007"), EntityId::Text("007".to_string()));
        assert_eq!(EntityId::from("0"), EntityId::Numeric(0));
        assert_eq!(EntityId::from("+7"), EntityId::Text("+7".to_string()));
        assert_eq!(EntityId::from(""), EntityId::Text(String::new()));
    }

    #[test]
    fn test_display_round_trips_the_source_text() {
        for raw in ["139475048", "dcbab999-7523-4e2f-adf4-57d10fc17516"] {
            assert_eq!(EntityId::from(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_deserializes_numbers_and_strings() {
        let ids: Vec<EntityId> = serde_json::from_str(r#"[22563744, "abc-def"]"#).unwrap();
        assert_eq!(
            ids,
            vec![EntityId::Numeric(22563744), EntityId::Text("abc-def".into())]
        );
    }
}
