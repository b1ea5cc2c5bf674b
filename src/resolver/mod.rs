//! 解析器模块
//!
//! 维护一个从 URL 标签到构造函数的注册表，
//! 用于在不知道实体类型的情况下把 URL 解析为对应的实体。

use std::sync::LazyLock;

use futures::future::BoxFuture;

use crate::{
    error::{Result, TidalError},
    model::{
        CatalogObject,
        album::Album,
        entity::{Entity, EntityId},
        playlist::Playlist,
        track::Track,
    },
    session::Session,
};

pub mod url;

/// 根据 ID 构造并加载实体的函数。
pub type Constructor = fn(Session, EntityId) -> BoxFuture<'static, Result<CatalogObject>>;

static DEFAULT_RESOLVER: LazyLock<Resolver> = LazyLock::new(Resolver::default);

/// 返回注册了所有内置实体类型的解析器。
pub fn default_resolver() -> &'static Resolver {
    &DEFAULT_RESOLVER
}

fn construct<T>(session: Session, id: EntityId) -> BoxFuture<'static, Result<CatalogObject>>
where
    T: Entity + Into<CatalogObject> + 'static,
{
    Box::pin(async move { T::fetch(session, id).await.map(Into::into) })
}

#[derive(Clone, Copy)]
struct RegistryEntry {
    tag: &'static str,
    construct: Constructor,
}

/// URL 标签到构造函数的有序注册表。
///
/// 解析时按注册顺序逐个尝试，第一个能从 URL 中提取出 ID 的类型胜出。
#[derive(Clone)]
pub struct Resolver {
    entries: Vec<RegistryEntry>,
}

impl Default for Resolver {
    /// 依次注册 `Track`、`Album`、`Playlist`。
    fn default() -> Self {
        let mut resolver = Self::empty();
        resolver
            .register::<Track>()
            .register::<Album>()
            .register::<Playlist>();
        resolver
    }
}

impl Resolver {
    /// 创建一个空的注册表。
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    ///
    /// 注册一个实体类型。
    ///
    /// 没有声明 `URL_TAG` 的类型会被跳过。
    /// 重复注册同一个标签时，新的构造函数替换旧的，位置不变。
    ///
    pub fn register<T>(&mut self) -> &mut Self
    where
        T: Entity + Into<CatalogObject> + 'static,
    {
        let Some(tag) = T::URL_TAG else {
            tracing::debug!(
                "[Resolver] 类型 {} 没有 URL 标签，跳过注册",
                std::any::type_name::<T>()
            );
            return self;
        };

        let entry = RegistryEntry {
            tag,
            construct: construct::<T>,
        };
        match self.entries.iter_mut().find(|e| e.tag == tag) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        self
    }

    /// 按注册顺序返回所有标签。
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.tag)
    }

    /// 查找某个标签对应的构造函数。
    pub fn constructor(&self, tag: &str) -> Option<Constructor> {
        self.entries
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.construct)
    }

    /// 按注册顺序尝试每个标签，返回第一个匹配的标签和 ID。不发起请求。
    pub fn identify(&self, url: &str) -> Result<(&'static str, EntityId)> {
        self.entries
            .iter()
            .find_map(|e| url::id_from_url(url, e.tag).ok().map(|id| (e.tag, id)))
            .ok_or_else(|| TidalError::InvalidUrl(url.to_string()))
    }

    ///
    /// 把 URL 解析为实体并加载。
    ///
    /// # 返回
    /// 没有任何已注册的标签能匹配时返回 `TidalError::InvalidUrl`；
    /// 加载过程中的错误原样返回。
    ///
    pub async fn resolve(&self, session: &Session, url: &str) -> Result<CatalogObject> {
        let (tag, id) = self.identify(url)?;
        let construct = self
            .constructor(tag)
            .ok_or_else(|| TidalError::InvalidUrl(url.to_string()))?;

        tracing::debug!("[Resolver] '{}' 解析为 {} {}", url, tag, id);
        construct(session.clone(), id).await
    }
}
