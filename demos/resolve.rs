//! 用于演示 `tidal-helper` 库的链接解析功能。
//!
//! ## 如何运行
//!
//! ```bash
//! cargo run --package tidal_helper_rs --example resolve -- "https://tidal.com/browse/track/22563749"
//! ```
//!
//! 需要先在配置目录的 `tidal-helper/config.json` 中填写 `clientId` 和 `accessToken`。

use tidal_helper_rs::config::load_config;
use tidal_helper_rs::error::Result;
use tidal_helper_rs::{AudioQuality, CatalogObject, Entity, Session};

use tracing::{Level, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        warn!("请在命令行参数中提供包含 TIDAL 链接的文本。");
        return Ok(());
    }

    let config = load_config()?;
    let session = Session::from_config(&config)?;
    info!("会话已创建，国家/地区代码: {}", session.country_code());

    for object in session.parse_urls(&text).await? {
        match object {
            CatalogObject::Track(track) => {
                info!(
                    "曲目 {}: {}",
                    track.id(),
                    track.title().unwrap_or_default()
                );
                match track.stream_url(AudioQuality::default()).await {
                    Ok(url) => info!("  音频流: {url}"),
                    Err(e) => error!("  获取音频流失败: {e}"),
                }
                match track.metadata_tags().await {
                    Ok(tags) => {
                        for (key, value) in tags {
                            info!("  {key} = {value}");
                        }
                    }
                    Err(e) => error!("  合成元数据失败: {e}"),
                }
            }
            CatalogObject::Album(mut album) => {
                info!(
                    "专辑 {}: {}",
                    album.id(),
                    album.title().unwrap_or_default()
                );
                for (index, track) in album.tracks().await?.iter().enumerate() {
                    info!("  {:>2}. {}", index + 1, track.title().unwrap_or_default());
                }
            }
            CatalogObject::Playlist(mut playlist) => {
                info!(
                    "歌单 {}: {}",
                    playlist.id(),
                    playlist.title().unwrap_or_default()
                );
                let tracks = playlist.tracks().await?;
                info!("  共 {} 首曲目", tracks.len());
            }
        }
    }

    Ok(())
}
