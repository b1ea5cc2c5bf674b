//! 会话：实体访问远程 API 时共享的上下文。

use std::{fmt, sync::Arc};

use serde::de::DeserializeOwned;

use crate::{
    accessor::{HttpAccessor, RemoteAccessor, SeekableFileFactory},
    config::ClientConfig,
    error::Result,
    model::{
        CatalogObject,
        album::Album,
        entity::{Entity, EntityId},
        playlist::Playlist,
        track::Track,
    },
    resolver::{self, url::find_catalog_urls},
};

/// 持有远程访问器和国家/地区代码的会话。
///
/// 克隆的开销很小，每个实体都持有一份。
#[derive(Clone)]
pub struct Session {
    accessor: Arc<dyn RemoteAccessor>,
    country_code: String,
    file_factory: Option<Arc<dyn SeekableFileFactory>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("country_code", &self.country_code)
            .field("file_factory", &self.file_factory.is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// 用调用方提供的访问器创建会话。
    pub fn new(accessor: Arc<dyn RemoteAccessor>, country_code: impl Into<String>) -> Self {
        Self {
            accessor,
            country_code: country_code.into(),
            file_factory: None,
        }
    }

    /// 根据客户端配置创建一个使用 `HttpAccessor` 的会话。
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let accessor = HttpAccessor::new(config)?;
        Ok(Self::new(Arc::new(accessor), config.country_code.clone()))
    }

    /// 注入打开远程文件的工厂。
    pub fn with_file_factory(mut self, factory: Arc<dyn SeekableFileFactory>) -> Self {
        self.file_factory = Some(factory);
        self
    }

    /// 会话的国家/地区代码。
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// 注入的文件工厂（如果有）。
    pub fn file_factory(&self) -> Option<&Arc<dyn SeekableFileFactory>> {
        self.file_factory.as_ref()
    }

    /// 发起 GET 请求并把响应解码为 `T`。会自动附加 `countryCode` 参数。
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        mut params: Vec<(&str, String)>,
    ) -> Result<T> {
        params.push(("countryCode", self.country_code.clone()));
        let body = self.accessor.get(path, &params).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// 按 ID 加载一首曲目。
    pub async fn track(&self, id: impl Into<EntityId>) -> Result<Track> {
        Track::fetch(self.clone(), id.into()).await
    }

    /// 按 ID 加载一张专辑。
    pub async fn album(&self, id: impl Into<EntityId>) -> Result<Album> {
        Album::fetch(self.clone(), id.into()).await
    }

    /// 按 UUID 加载一个歌单。
    pub async fn playlist(&self, id: impl Into<EntityId>) -> Result<Playlist> {
        Playlist::fetch(self.clone(), id.into()).await
    }

    /// 把一个曲库 URL 解析为对应类型的实体并加载。
    pub async fn resolve(&self, url: &str) -> Result<CatalogObject> {
        resolver::default_resolver().resolve(self, url).await
    }

    ///
    /// 找出一段文本中的所有曲库 URL，按出现顺序逐个解析并加载。
    ///
    /// 适用于移动端分享出来的文本，例如
    /// `Check out this track on TIDAL: "..." https://tidal.com/track/150525636`。
    ///
    pub async fn parse_urls(&self, text: &str) -> Result<Vec<CatalogObject>> {
        let urls = find_catalog_urls(text);
        tracing::debug!("[Session] 在文本中找到 {} 个链接", urls.len());

        let mut objects = Vec::with_capacity(urls.len());
        for url in urls {
            objects.push(self.resolve(url).await?);
        }
        Ok(objects)
    }
}
