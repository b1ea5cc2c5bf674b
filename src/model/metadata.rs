//! 由曲目与其所属专辑合成音频文件元数据标签。

use std::collections::BTreeMap;

use crate::{
    error::{Result, TidalError},
    model::{album::Album, response::ArtistInfo, track::Track},
};

/// 扁平的元数据标签集合。键是 Vorbis 风格的小写标签名。
///
/// 值为空或缺失的可选标签不会出现在集合中。
pub type MetadataTags = BTreeMap<&'static str, String>;

/// 只保留非空的字符串。
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

///
/// 规范化标题，附加合作艺术家和版本说明。
///
/// 多于一位艺术家时，标题后追加 ` (feat. B & C)`（标题里已经有 `(feat.` 时不追加），
/// 版本说明用方括号；否则版本说明用圆括号。
/// 标题本身已包含版本说明时不会重复追加。
///
/// # 参数
/// * `title` - 原始标题。
/// * `version` - 版本说明，例如 "Remastered"。
/// * `artists` - 全部艺术家，主艺术家在前。
///
pub fn parse_title(title: &str, version: Option<&str>, artists: &[ArtistInfo]) -> String {
    let version = present(version).filter(|v| !title.contains(v));

    if artists.len() > 1 {
        let mut parsed = title.trim().to_string();
        if !parsed.contains("(feat.") {
            let featuring = artists[1..]
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(" & ");
            parsed.push_str(&format!(" (feat. {featuring})"));
        }
        if let Some(version) = version {
            parsed.push_str(&format!(" [{version}]"));
        }
        parsed
    } else {
        match version {
            Some(version) => format!("{title} ({version})"),
            None => title.to_string(),
        }
    }
}

/// 合成元数据标签。`album` 应当是已经加载过的专辑。
pub(crate) fn synthesize(track: &Track, album: &Album) -> Result<MetadataTags> {
    let track_info = track.info();
    let album_info = album.info();
    let mut tags = MetadataTags::new();

    let artist = track_info
        .artist
        .as_ref()
        .ok_or(TidalError::MissingField("artist"))?;
    let title = track.title().ok_or(TidalError::MissingField("title"))?;
    tags.insert("artist", artist.name.clone());
    tags.insert(
        "title",
        parse_title(title, track_info.version.as_deref(), &track_info.artists),
    );

    let album_artist = album_info
        .artist
        .as_ref()
        .ok_or(TidalError::MissingField("album.artist"))?;
    let album_title = album.title().ok_or(TidalError::MissingField("album.title"))?;
    tags.insert("albumartist", album_artist.name.clone());
    tags.insert(
        "album",
        parse_title(album_title, album_info.version.as_deref(), &[]),
    );

    let year = album.year().ok_or(TidalError::MissingField("releaseDate"))?;
    tags.insert("date", year.to_string());

    let numbers = [
        ("discnumber", track_info.volume_number, "volumeNumber"),
        ("disctotal", album_info.number_of_volumes, "numberOfVolumes"),
        ("tracknumber", track_info.track_number, "trackNumber"),
        ("tracktotal", album_info.number_of_tracks, "numberOfTracks"),
    ];
    for (tag, value, field) in numbers {
        let value = value.ok_or(TidalError::MissingField(field))?;
        tags.insert(tag, value.to_string());
    }

    // 曲目的版权信息有时为 null，此时退回到专辑的版权信息
    let copyright = present(track_info.copyright.as_deref())
        .or_else(|| present(album_info.copyright.as_deref()));
    if let Some(copyright) = copyright {
        tags.insert("copyright", copyright.to_string());
    }
    if let Some(isrc) = present(track_info.isrc.as_deref()) {
        tags.insert("isrc", isrc.to_string());
    }
    if let Some(upc) = present(album_info.upc.as_deref()) {
        tags.insert("upc", upc.to_string());
    }

    Ok(tags)
}
