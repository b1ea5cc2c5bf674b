//! 曲目实体。

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Map, Value};

use crate::{
    accessor::SeekableFile,
    error::{Result, TidalError},
    model::{
        album::Album,
        cover::Cover,
        entity::{Entity, EntityId},
        metadata::{self, MetadataTags},
        quality::{AudioMode, AudioQuality},
        response::{ArtistInfo, PlaybackInfo, StreamManifest, TrackInfo},
    },
    session::Session,
};

/// 一首曲目。
///
/// `reload` 会整体替换属性。
#[derive(Debug, Clone)]
pub struct Track {
    session: Session,
    id: EntityId,
    info: TrackInfo,
    hydrated: bool,
}

impl Track {
    /// 用已有的属性（例如专辑或歌单中嵌入的曲目数据）构造曲目，不发起请求。
    pub fn from_info(session: Session, info: TrackInfo) -> Result<Self> {
        let id = info.id.clone().ok_or(TidalError::MissingField("track.id"))?;
        Ok(Self {
            session,
            id,
            info,
            hydrated: false,
        })
    }

    /// 当前已加载的属性。
    pub fn info(&self) -> &TrackInfo {
        &self.info
    }

    /// 曲目标题。
    pub fn title(&self) -> Option<&str> {
        self.info.title.as_deref()
    }

    /// 全部艺术家。
    pub fn artists(&self) -> &[ArtistInfo] {
        &self.info.artists
    }

    /// 用嵌入的专辑信息构造专辑存根，不发起请求。
    pub fn album(&self) -> Result<Album> {
        let info = self
            .info
            .album
            .clone()
            .ok_or(TidalError::MissingField("album"))?;
        Album::from_info(self.session.clone(), info)
    }

    /// 曲目封面，即所属专辑的封面。
    pub fn cover(&self) -> Result<Cover> {
        self.album()?.cover()
    }

    /// 曲目的最高可用音质。
    pub fn audio_quality(&self) -> Result<AudioQuality> {
        let raw = self
            .info
            .audio_quality
            .as_deref()
            .ok_or(TidalError::MissingField("audioQuality"))?;
        AudioQuality::parse(raw)
    }

    /// 曲目支持的声道模式。
    pub fn audio_modes(&self) -> Result<Vec<AudioMode>> {
        self.info
            .audio_modes
            .iter()
            .map(|raw| AudioMode::parse(raw))
            .collect()
    }

    async fn playback_info(&self, quality: AudioQuality) -> Result<PlaybackInfo> {
        let path = format!(
            "/v1/tracks/{}/playbackinfopostpaywall",
            self.id.path_segment()
        );
        let params = vec![
            ("playbackmode", "STREAM".to_string()),
            ("assetpresentation", "FULL".to_string()),
            ("audioquality", quality.as_ref().to_string()),
        ];
        self.session.get(&path, params).await
    }

    ///
    /// 获取指定音质的播放清单。
    ///
    /// 清单以 Base64 编码的 JSON 形式嵌在响应的 `manifest` 字段中。
    /// 不会修改曲目的任何属性。
    ///
    /// # 返回
    /// 清单无法解码时返回 `TidalError::Decode`。
    ///
    pub async fn stream_manifest(&self, quality: AudioQuality) -> Result<StreamManifest> {
        let playback = self.playback_info(quality).await?;
        decode_manifest(&playback.manifest)
    }

    /// 获取指定音质的第一个流地址。
    pub async fn stream_url(&self, quality: AudioQuality) -> Result<String> {
        let manifest = self.stream_manifest(quality).await?;
        manifest
            .urls
            .into_iter()
            .next()
            .ok_or_else(|| TidalError::NoStreamAvailable(self.id.to_string()))
    }

    ///
    /// 生成用于写入音频文件的元数据标签。
    ///
    /// 总会重新加载所属专辑，以获得曲目总数、碟片总数等只在专辑详情里出现的字段。
    ///
    pub async fn metadata_tags(&self) -> Result<MetadataTags> {
        let mut album = self.album()?;
        album.reload().await?;
        metadata::synthesize(self, &album)
    }

    /// 通过会话注入的文件工厂打开曲目的音频流。
    ///
    /// 未提供文件名时使用曲目标题。
    pub async fn get_file(
        &self,
        filename: Option<&str>,
        quality: AudioQuality,
    ) -> Result<Box<dyn SeekableFile>> {
        let factory = self.session.file_factory().cloned().ok_or_else(|| {
            TidalError::UnsupportedOperation("会话未提供文件工厂".to_string())
        })?;
        let filename = match filename {
            Some(name) => name.to_string(),
            None => self.title().unwrap_or_default().to_string(),
        };
        let url = self.stream_url(quality).await?;
        factory.open(&url, &filename).await
    }
}

fn decode_manifest(encoded: &str) -> Result<StreamManifest> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| TidalError::Decode(format!("Base64 无效: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| TidalError::Decode(format!("JSON 无效: {e}")))
}

#[async_trait]
impl Entity for Track {
    const URL_TAG: Option<&'static str> = Some("track");

    fn stub(session: Session, id: EntityId) -> Self {
        Self {
            session,
            id,
            info: TrackInfo::default(),
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
        let path = format!("/v1/tracks/{}", self.id.path_segment());
        let info: TrackInfo = self.session.get(&path, Vec::new()).await?;
        self.info = info;
        self.hydrated = true;
        Ok(())
    }
}
