//! 此模块定义了所有用于反序列化 TIDAL API 响应的 `struct` 数据结构。
//!
//! 每个结构体只声明本库用到的字段，其余字段保存在 `extra` 中。

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::model::entity::EntityId;

/// 把 JSON 中的 `null` 当作缺省值处理。
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 艺术家的简要信息，嵌入在曲目和专辑中。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistInfo {
    /// 艺术家的数字 ID。
    pub id: Option<EntityId>,
    /// 艺术家名。服务端返回 `null` 时为空字符串。
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// 角色，例如 "MAIN" 或 "FEATURED"。
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// =================================================================
// 曲目接口 (`/v1/tracks/{id}`) 的模型
// =================================================================

/// 一首曲目的属性。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    /// 曲目的数字 ID。
    pub id: Option<EntityId>,
    /// 曲目标题。
    pub title: Option<String>,
    /// 版本说明，例如 "Remastered"。
    pub version: Option<String>,
    /// 时长（秒）。
    pub duration: Option<u64>,
    /// 在所属碟片中的序号。
    pub track_number: Option<u32>,
    /// 所属碟片的序号。
    pub volume_number: Option<u32>,
    /// 版权信息，服务端有时会返回 `null`。
    pub copyright: Option<String>,
    /// 国际标准录音代码。
    pub isrc: Option<String>,
    /// 是否包含不适宜内容。
    pub explicit: Option<bool>,
    /// 原始的音质字符串，例如 "LOSSLESS"。
    pub audio_quality: Option<String>,
    /// 原始的声道模式字符串列表。
    #[serde(default, deserialize_with = "null_as_default")]
    pub audio_modes: Vec<String>,
    /// 主艺术家。
    pub artist: Option<ArtistInfo>,
    /// 全部艺术家，主艺术家在前。
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistInfo>,
    /// 嵌入的专辑简要信息。
    pub album: Option<AlbumInfo>,
    /// 其余未声明的字段。
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =================================================================
// 专辑接口 (`/v1/albums/{id}`, `/v1/albums/{id}/tracks`) 的模型
// =================================================================

/// 一张专辑的属性。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumInfo {
    /// 专辑的数字 ID。
    pub id: Option<EntityId>,
    /// 专辑名。
    pub title: Option<String>,
    /// 版本说明，例如 "Deluxe"。
    pub version: Option<String>,
    /// 封面图片 ID。
    pub cover: Option<String>,
    /// 发行日期。
    pub release_date: Option<NaiveDate>,
    /// 版权信息。
    pub copyright: Option<String>,
    /// 通用产品代码。
    pub upc: Option<String>,
    /// 曲目总数。
    pub number_of_tracks: Option<u32>,
    /// 碟片总数。
    pub number_of_volumes: Option<u32>,
    /// 时长（秒）。
    pub duration: Option<u64>,
    /// 原始的音质字符串。
    pub audio_quality: Option<String>,
    /// 主艺术家。
    pub artist: Option<ArtistInfo>,
    /// 全部艺术家。
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<ArtistInfo>,
    /// 已缓存的曲目列表。只有调用过 `Album::tracks` 后才会出现。
    pub items: Option<Vec<TrackInfo>>,
    /// 其余未声明的字段。
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =================================================================
// 歌单接口 (`/v1/playlists/{id}`, `/v1/playlists/{id}/items`) 的模型
// =================================================================

/// 一个歌单的属性。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    /// 歌单的 UUID。
    pub uuid: Option<String>,
    /// 歌单名。
    pub title: Option<String>,
    /// 歌单描述。
    pub description: Option<String>,
    /// 长方形封面图片 ID。
    pub image: Option<String>,
    /// 正方形封面图片 ID。
    pub square_image: Option<String>,
    /// 曲目数。
    pub number_of_tracks: Option<u32>,
    /// 视频数。
    pub number_of_videos: Option<u32>,
    /// 时长（秒）。
    pub duration: Option<u64>,
    /// 已缓存的全部条目。只有调用过 `Playlist::tracks` 后才会出现。
    pub items: Option<Vec<PlaylistItem>>,
    /// 其余未声明的字段。
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PlaylistInfo {
    ///
    /// 把新的响应按键合并进来。
    ///
    /// 响应中出现的键（包括值为 `null` 的键）覆盖旧值，
    /// 没有出现的键（包括已缓存的 `items`）保持不变。
    ///
    /// # 返回
    /// 响应无法解码为歌单属性时返回错误，此时不会修改任何字段。
    ///
    pub fn merge(&mut self, newer: Map<String, Value>) -> crate::error::Result<()> {
        fn overwrite<T>(slot: &mut Option<T>, value: Option<T>, present: bool) {
            if present {
                *slot = value;
            }
        }

        let present = |key: &str| newer.contains_key(key);
        let flags = [
            present("uuid"),
            present("title"),
            present("description"),
            present("image"),
            present("squareImage"),
            present("numberOfTracks"),
            present("numberOfVideos"),
            present("duration"),
            present("items"),
        ];
        let info: PlaylistInfo = serde_json::from_value(Value::Object(newer))?;

        overwrite(&mut self.uuid, info.uuid, flags[0]);
        overwrite(&mut self.title, info.title, flags[1]);
        overwrite(&mut self.description, info.description, flags[2]);
        overwrite(&mut self.image, info.image, flags[3]);
        overwrite(&mut self.square_image, info.square_image, flags[4]);
        overwrite(&mut self.number_of_tracks, info.number_of_tracks, flags[5]);
        overwrite(&mut self.number_of_videos, info.number_of_videos, flags[6]);
        overwrite(&mut self.duration, info.duration, flags[7]);
        overwrite(&mut self.items, info.items, flags[8]);
        self.extra.extend(info.extra);
        Ok(())
    }
}

/// 歌单中的一个条目。
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    /// 条目类型，例如 "track" 或 "video"。
    #[serde(rename = "type")]
    pub kind: String,
    /// 条目内嵌的完整数据。
    pub item: Value,
}

/// 列表接口的一页数据。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsPage<T> {
    /// 本页的条目。
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// 服务端报告的条目总数。
    #[serde(default)]
    pub total_number_of_items: usize,
    /// 本页的起始偏移。
    pub offset: Option<usize>,
    /// 本页的大小上限。
    pub limit: Option<usize>,
}

// =================================================================
// 播放信息接口 (`/v1/tracks/{id}/playbackinfopostpaywall`) 的模型
// =================================================================

/// 播放信息接口的响应。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackInfo {
    /// 曲目 ID。
    pub track_id: Option<EntityId>,
    /// 实际提供的音质。
    pub audio_quality: Option<String>,
    /// 清单的 MIME 类型，例如 "application/vnd.tidal.bts"。
    pub manifest_mime_type: Option<String>,
    /// Base64 编码的清单。
    pub manifest: String,
}

/// 解码后的播放清单。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamManifest {
    /// 音频的 MIME 类型，例如 "audio/flac"。
    pub mime_type: Option<String>,
    /// 编码格式，例如 "flac"。
    pub codecs: Option<String>,
    /// 加密方式，未加密时为 "NONE"。
    pub encryption_type: Option<String>,
    /// 可用的流地址。
    #[serde(default)]
    pub urls: Vec<String>,
}
