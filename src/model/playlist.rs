//! 歌单实体。

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    error::{Result, TidalError},
    model::{
        cover::Cover,
        entity::{Entity, EntityId},
        response::{ItemsPage, PlaylistInfo, PlaylistItem, TrackInfo},
        track::Track,
    },
    session::Session,
};

/// 歌单条目接口每页的条目数，与官方网页端一致。
pub const PAGE_SIZE: usize = 50;

const TRACK_ITEM_TYPE: &str = "track";

/// 一个歌单。
///
/// 与曲目和专辑不同，`reload` 会把新响应合并进已有属性，
/// 已缓存的条目列表在刷新元数据后仍然保留。
#[derive(Debug, Clone)]
pub struct Playlist {
    session: Session,
    id: EntityId,
    info: PlaylistInfo,
    hydrated: bool,
}

impl Playlist {
    /// 当前已加载的属性。
    pub fn info(&self) -> &PlaylistInfo {
        &self.info
    }

    /// 歌单名。
    pub fn title(&self) -> Option<&str> {
        self.info.title.as_deref()
    }

    /// 歌单封面。
    pub fn cover(&self) -> Result<Cover> {
        let id = self
            .info
            .image
            .as_ref()
            .ok_or(TidalError::MissingField("image"))?;
        Ok(Cover::new(self.session.clone(), id.clone()))
    }

    /// 正方形的歌单封面。
    pub fn square_cover(&self) -> Result<Cover> {
        let id = self
            .info
            .square_image
            .as_ref()
            .ok_or(TidalError::MissingField("squareImage"))?;
        Ok(Cover::new(self.session.clone(), id.clone()))
    }

    ///
    /// 逐页获取歌单的全部条目。
    ///
    /// 每页 `PAGE_SIZE` 条，直到累计条目数达到服务端报告的总数为止。
    /// 第一页返回之前无法得知总数，因此各页只能依次请求。
    ///
    async fn fetch_items(&self) -> Result<Vec<PlaylistItem>> {
        let path = format!("/v1/playlists/{}/items", self.id.path_segment());
        let mut items: Vec<PlaylistItem> = Vec::new();
        let mut offset: usize = 0;

        loop {
            let params = vec![
                ("offset", offset.to_string()),
                ("limit", PAGE_SIZE.to_string()),
            ];
            let page: ItemsPage<PlaylistItem> = self.session.get(&path, params).await?;
            let fetched = page.items.len();
            items.extend(page.items);

            tracing::debug!(
                "[Playlist] 歌单 {} 已获取 {} / {} 个条目",
                self.id,
                items.len(),
                page.total_number_of_items
            );

            if items.len() >= page.total_number_of_items {
                break;
            }
            if fetched == 0 {
                tracing::warn!(
                    "[Playlist] 歌单 {} 在偏移 {} 处返回了空页，但总数为 {}，停止分页",
                    self.id,
                    offset,
                    page.total_number_of_items
                );
                break;
            }
            offset += PAGE_SIZE;
        }

        Ok(items)
    }

    ///
    /// 获取歌单中的全部曲目，按服务端顺序返回。
    ///
    /// 第一次调用时逐页获取全部条目并缓存，之后直接使用缓存。
    /// 非曲目类型的条目（例如视频）会被忽略。
    ///
    pub async fn tracks(&mut self) -> Result<Vec<Track>> {
        if self.info.items.is_none() {
            let items = self.fetch_items().await?;
            self.info.items = Some(items);
        }

        self.info
            .items
            .iter()
            .flatten()
            .filter(|item| item.kind == TRACK_ITEM_TYPE)
            .map(|item| -> Result<Track> {
                let info: TrackInfo = serde_json::from_value(item.item.clone())?;
                Track::from_info(self.session.clone(), info)
            })
            .collect()
    }
}

#[async_trait]
impl Entity for Playlist {
    const URL_TAG: Option<&'static str> = Some("playlist");

    fn stub(session: Session, id: EntityId) -> Self {
        Self {
            session,
            id,
            info: PlaylistInfo::default(),
            hydrated: false,
        }
    }

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn session(&self) -> &Session {
        &self.session
    }

    fn extra(&self) -> &Map<String, Value> {
        &self.info.extra
    }

    fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    async fn reload(&mut self) -> Result<()> {
        let path = format!("/v1/playlists/{}", self.id.path_segment());
        let response: Map<String, Value> = self.session.get(&path, Vec::new()).await?;
        self.info.merge(response)?;
        self.hydrated = true;
        Ok(())
    }
}
