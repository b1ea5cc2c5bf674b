//! 曲库对象模型。

pub mod album;
pub mod cover;
pub mod entity;
pub mod metadata;
pub mod playlist;
pub mod quality;
pub mod response;
pub mod track;

use crate::model::{album::Album, entity::EntityId, playlist::Playlist, track::Track};
use entity::Entity;

/// 由 URL 解析得到的任意一种实体。
#[derive(Debug, Clone)]
pub enum CatalogObject {
    /// 曲目。
    Track(Track),
    /// 专辑。
    Album(Album),
    /// 歌单。
    Playlist(Playlist),
}

impl CatalogObject {
    /// 实体的 ID。
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Track(track) => track.id(),
            Self::Album(album) => album.id(),
            Self::Playlist(playlist) => playlist.id(),
        }
    }

    /// 实体类型对应的 URL 标签。
    pub fn tag(&self) -> &'static str {
        let tag = match self {
            Self::Track(_) => Track::URL_TAG,
            Self::Album(_) => Album::URL_TAG,
            Self::Playlist(_) => Playlist::URL_TAG,
        };
        tag.unwrap_or_default()
    }

    /// 如果是曲目则返回它。
    pub fn into_track(self) -> Option<Track> {
        match self {
            Self::Track(track) => Some(track),
            _ => None,
        }
    }

    /// 如果是专辑则返回它。
    pub fn into_album(self) -> Option<Album> {
        match self {
            Self::Album(album) => Some(album),
            _ => None,
        }
    }

    /// 如果是歌单则返回它。
    pub fn into_playlist(self) -> Option<Playlist> {
        match self {
            Self::Playlist(playlist) => Some(playlist),
            _ => None,
        }
    }
}

impl From<Track> for CatalogObject {
    fn from(track: Track) -> Self {
        Self::Track(track)
    }
}

impl From<Album> for CatalogObject {
    fn from(album: Album) -> Self {
        Self::Album(album)
    }
}

impl From<Playlist> for CatalogObject {
    fn from(playlist: Playlist) -> Self {
        Self::Playlist(playlist)
    }
}
