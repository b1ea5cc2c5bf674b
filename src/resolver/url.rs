//! 曲库 URL 的解析。纯函数，不发起任何请求。

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    error::{Result, TidalError},
    model::entity::EntityId,
};

static CATALOG_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://)?(?:[a-z0-9-]+\.)*tidal\.com(?::\d+)?(?:/[^\s<>]*)?")
        .expect("编译 CATALOG_URL_REGEX 失败")
});

/// 分享文本中常跟在链接后面的标点。
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '"', '\''];

/// 拆分出主机名和非空的路径段。查询串和片段会被忽略。
fn split_url(url: &str) -> (Option<&str>, Vec<&str>) {
    let url = url.trim();
    let url = url.split(['?', '#']).next().unwrap_or_default();

    let (has_authority, rest) = if let Some(index) = url.find("://") {
        (true, &url[index + 3..])
    } else if let Some(rest) = url.strip_prefix("//") {
        (true, rest)
    } else {
        (false, url)
    };

    let mut segments = rest.split('/');
    let host = match segments.clone().next() {
        // 没有协议时，只有带点的首段才被视为主机名，例如 "tidal.com/track/1"
        Some(first) if has_authority || first.contains('.') => {
            segments.next();
            Some(first)
        }
        _ => None,
    };

    (host, segments.filter(|s| !s.is_empty()).collect())
}

///
/// 在 URL 的路径中找到 `tag` 对应的路径段，并返回紧随其后的路径段作为 ID。
///
/// # 参数
/// * `url` - 任意形式的曲库 URL，协议可省略。
/// * `tag` - 实体类型的 URL 标签，例如 `"track"`。
///
/// # 返回
/// 找不到标签或标签后没有 ID 时返回 `TidalError::InvalidUrl`。
///
pub fn id_from_url(url: &str, tag: &str) -> Result<EntityId> {
    let (_, segments) = split_url(url);

    segments
        .iter()
        .position(|segment| *segment == tag)
        .and_then(|index| segments.get(index + 1))
        .map(|id| EntityId::from(*id))
        .ok_or_else(|| TidalError::InvalidUrl(url.to_string()))
}

/// 判断 URL 是否指向 `tidal.com` 或其子域名。协议可省略。
pub fn is_valid_url(url: &str) -> bool {
    let (host, _) = split_url(url);
    let Some(host) = host else {
        return false;
    };
    let host = host.rsplit('@').next().unwrap_or(host);
    let host = host.split(':').next().unwrap_or(host).to_ascii_lowercase();

    host == "tidal.com" || host.ends_with(".tidal.com")
}

/// 找出一段文本中所有指向 TIDAL 的 URL，按出现顺序返回。
pub fn find_catalog_urls(text: &str) -> Vec<&str> {
    CATALOG_URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION))
        .filter(|url| is_valid_url(url))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_follows_tag() {
        let cases = [
            ("http://www.tidal.com/track/50096997", "track", "50096997"),
            ("https://listen.tidal.com/album/152676381", "album", "152676381"),
            ("tidal.com/browse/album/139475048?play=true", "album", "139475048"),
            (
                "https://tidal.com/playlist/dcbab999-7523-4e2f-adf4-57d10fc17516/",
                "playlist",
                "dcbab999-7523-4e2f-adf4-57d10fc17516",
            ),
            ("https://tidal.com/album/1/track/2", "track", "2"),
        ];

        for (url, tag, expected) in cases {
            assert_eq!(
                id_from_url(url, tag).unwrap(),
                EntityId::from(expected),
                "URL: {url}"
            );
        }
    }

    #[test]
    fn test_missing_tag_or_id_is_invalid() {
        for (url, tag) in [
            ("https://tidal.com/album/1", "track"),
            ("https://tidal.com/track", "track"),
            ("https://tidal.com/track/", "track"),
            ("", "track"),
            // 标签出现在主机名里不算
            ("https://track.tidal.com/1", "track"),
            // 标签出现在查询串里不算
            ("https://tidal.com/search?track/1", "track"),
        ] {
            assert!(
                matches!(id_from_url(url, tag), Err(TidalError::InvalidUrl(_))),
                "URL: {url}"
            );
        }
    }

    #[test]
    fn test_valid_hosts() {
        assert!(is_valid_url("https://tidal.com/track/1"));
        assert!(is_valid_url("listen.tidal.com/album/1"));
        assert!(is_valid_url("//www.tidal.com/"));
        assert!(is_valid_url("https://TIDAL.com:443/track/1"));
        assert!(!is_valid_url("https://nottidal.com/track/1"));
        assert!(!is_valid_url("https://tidal.com.evil.org/track/1"));
        assert!(!is_valid_url("track/1"));
    }

    #[test]
    fn test_find_urls_in_shared_text() {
        let text = "Check out this track on TIDAL: \"PATOINTELIGENCJA (REMIX ZAJEBI$TY)\" \
                    by WIXAPOL, Mata https://tidal.com/track/150525636";
        assert_eq!(
            find_catalog_urls(text),
            vec!["https://tidal.com/track/150525636"]
        );
    }

    #[test]
    fn test_find_multiple_urls_keeps_order() {
        let text = "http://www.tidal.com/track/50096997 http://www.tidal.com/album/139475048\n\
                    http://www.tidal.com/track/50096997.";
        assert_eq!(
            find_catalog_urls(text),
            vec![
                "http://www.tidal.com/track/50096997",
                "http://www.tidal.com/album/139475048",
                "http://www.tidal.com/track/50096997",
            ]
        );
        assert!(find_catalog_urls("").is_empty());
        assert!(find_catalog_urls("no links here").is_empty());
    }
}
