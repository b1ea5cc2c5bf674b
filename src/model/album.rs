//! 专辑实体。

use async_trait::async_trait;
use chrono::Datelike;
use serde_json::{Map, Value};

use crate::{
    error::{Result, TidalError},
    model::{
        cover::Cover,
        entity::{Entity, EntityId},
        response::{AlbumInfo, TrackInfo},
        track::Track,
    },
    session::Session,
};

/// 一张专辑。
///
/// `reload` 会整体替换属性，已缓存的曲目列表随之丢弃。
#[derive(Debug, Clone)]
pub struct Album {
    session: Session,
    id: EntityId,
    info: AlbumInfo,
    hydrated: bool,
}

impl Album {
    /// 用已有的属性（例如曲目中嵌入的专辑信息）构造专辑，不发起请求。
    pub fn from_info(session: Session, info: AlbumInfo) -> Result<Self> {
        let id = info.id.clone().ok_or(TidalError::MissingField("album.id"))?;
        Ok(Self {
            session,
            id,
            info,
            hydrated: false,
        })
    }

    /// 当前已加载的属性。
    pub fn info(&self) -> &AlbumInfo {
        &self.info
    }

    /// 专辑名。
    pub fn title(&self) -> Option<&str> {
        self.info.title.as_deref()
    }

    /// 发行年份。
    pub fn year(&self) -> Option<i32> {
        self.info.release_date.map(|date| date.year())
    }

    /// 专辑封面。
    pub fn cover(&self) -> Result<Cover> {
        let id = self
            .info
            .cover
            .as_ref()
            .ok_or(TidalError::MissingField("cover"))?;
        Ok(Cover::new(self.session.clone(), id.clone()))
    }

    ///
    /// 获取专辑的全部曲目，按服务端顺序返回。
    ///
    /// 第一次调用时请求 `/v1/albums/{id}/tracks`，把 `items` 缓存为曲目列表，
    /// 响应中的其余键（例如 `totalNumberOfItems`）合并进原始属性。
    /// 之后的调用直接使用缓存，直到下一次 `reload`。
    ///
    pub async fn tracks(&mut self) -> Result<Vec<Track>> {
        if self.info.items.is_none() {
            let path = format!("/v1/albums/{}/tracks", self.id.path_segment());
            let mut page: Map<String, Value> = self.session.get(&path, Vec::new()).await?;
            let items: Vec<TrackInfo> = match page.remove("items") {
                Some(Value::Null) | None => Vec::new(),
                Some(items) => serde_json::from_value(items)?,
            };
            tracing::debug!("[Album] 专辑 {} 获取到 {} 首曲目", self.id, items.len());
            self.info.extra.extend(page);
            self.info.items = Some(items);
        }

        self.info
            .items
            .iter()
            .flatten()
            .map(|info| Track::from_info(self.session.clone(), info.clone()))
            .collect()
    }
}

#[async_trait]
impl Entity for Album {
    const URL_TAG: Option<&'static str> = Some("album");

    fn stub(session: Session, id: EntityId) -> Self {
        Self {
            session,
            id,
            info: AlbumInfo::default(),
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
        let path = format!("/v1/albums/{}", self.id.path_segment());
        let info: AlbumInfo = self.session.get(&path, Vec::new()).await?;
        self.info = info;
        self.hydrated = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::session::tests::{mock_session, stalling_session};

    const ALBUM_PATH: &str = "/v1/albums/22563744";
    const TRACKS_PATH: &str = "/v1/albums/22563744/tracks";

    fn album_handler(path: &str, _: &[(String, String)]) -> Option<Value> {
        match path {
            ALBUM_PATH => Some(json!({
                "id": 22563744,
                "title": "Nothing Was The Same",
                "cover": "aa-bb-cc",
                "releaseDate": "2013-09-24",
                "numberOfTracks": 3,
                "popularity": 80,
            })),
            TRACKS_PATH => Some(json!({
                "limit": 10,
                "offset": 0,
                "totalNumberOfItems": 3,
                "items": [
                    { "id": 1, "title": "Tuscan Leather" },
                    { "id": 2, "title": "Furthest Thing" },
                    { "id": 3, "title": "Started From the Bottom" },
                ],
            })),
            _ => None,
        }
    }

    #[tokio::test]
    async fn test_reload_replaces_attributes() {
        let (session, _) = mock_session(album_handler);
        let mut album = Album::stub(session, EntityId::Numeric(22563744));
        assert!(!album.is_hydrated());
        assert_eq!(album.title(), None);

        album.reload().await.unwrap();

        assert!(album.is_hydrated());
        assert_eq!(album.title(), Some("Nothing Was The Same"));
        assert_eq!(album.year(), Some(2013));
        assert_eq!(album.raw("popularity"), Some(&json!(80)));
        assert!(!album.contains("missing"));
        assert_eq!(album.cover().unwrap().id(), "aa-bb-cc");
    }

    #[tokio::test]
    async fn test_tracks_are_fetched_once_and_cached() {
        let (session, accessor) = mock_session(album_handler);
        let mut album = session.album(22563744u64).await.unwrap();

        let first = album.tracks().await.unwrap();
        let second = album.tracks().await.unwrap();

        assert_eq!(accessor.calls_to(TRACKS_PATH), 1);
        let titles: Vec<_> = first.iter().filter_map(Track::title).collect();
        assert_eq!(
            titles,
            vec!["Tuscan Leather", "Furthest Thing", "Started From the Bottom"]
        );
        assert_eq!(second.len(), 3);
        assert_eq!(accessor.calls()[1].param("countryCode"), Some("PL"));
    }

    #[tokio::test]
    async fn test_tracks_response_is_merged_into_attributes() {
        let (session, _) = mock_session(album_handler);
        let mut album = session.album(22563744u64).await.unwrap();
        assert!(!album.contains("totalNumberOfItems"));

        album.tracks().await.unwrap();

        assert_eq!(album.raw("totalNumberOfItems"), Some(&json!(3)));
        assert_eq!(album.raw("limit"), Some(&json!(10)));
        assert!(!album.contains("items"));
        assert_eq!(album.raw("popularity"), Some(&json!(80)));
        assert_eq!(album.info().items.as_ref().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_reload_discards_cached_tracks() {
        let (session, accessor) = mock_session(album_handler);
        let mut album = session.album(22563744u64).await.unwrap();

        album.tracks().await.unwrap();
        album.reload().await.unwrap();
        album.tracks().await.unwrap();

        assert_eq!(accessor.calls_to(TRACKS_PATH), 2);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_state() {
        let (session, _) = mock_session(|_, _| None);
        let info: AlbumInfo =
            serde_json::from_value(json!({ "id": 5, "title": "Kept" })).unwrap();
        let mut album = Album::from_info(session, info).unwrap();

        assert!(album.reload().await.is_err());
        assert_eq!(album.title(), Some("Kept"));
        assert!(!album.is_hydrated());
    }

    #[tokio::test]
    async fn test_cancelled_reload_keeps_previous_state() {
        let (session, _) = stalling_session(album_handler, |path, _| path == ALBUM_PATH);
        let info: AlbumInfo =
            serde_json::from_value(json!({ "id": 22563744, "title": "Kept" })).unwrap();
        let mut album = Album::from_info(session, info).unwrap();

        let result = tokio::time::timeout(Duration::from_millis(50), album.reload()).await;

        assert!(result.is_err());
        assert_eq!(album.title(), Some("Kept"));
        assert!(!album.is_hydrated());
    }

    #[test]
    fn test_missing_cover_and_id() {
        let (session, _) = mock_session(|_, _| None);
        let info: AlbumInfo = serde_json::from_value(json!({ "title": "No id" })).unwrap();
        assert!(matches!(
            Album::from_info(session.clone(), info),
            Err(TidalError::MissingField("album.id"))
        ));

        let album = Album::stub(session, EntityId::Numeric(1));
        assert!(matches!(album.cover(), Err(TidalError::MissingField("cover"))));
    }
}
