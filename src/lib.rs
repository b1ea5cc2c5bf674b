#![warn(missing_docs)]

//! # Tidal Helper RS
//!
//! 一个 Rust 库，用于把 TIDAL 的分享链接解析为强类型的曲库对象，
//! 并按需从远程 API 加载曲目、专辑和歌单的属性。
//!
//! ## 主要功能
//!
//! - **链接解析**: 从任意文本中找出 TIDAL 链接，并按实体类型构造对应的对象。
//! - **按需加载**: 对象在第一次访问远程属性之前不会发起请求。
//! - **歌单分页**: 自动逐页获取歌单的全部条目。
//! - **音频流**: 解码播放清单，取得音频流地址，合成元数据标签。
//!
//! ## 解析链接
//!
//! ```rust,no_run
//! use tidal_helper_rs::{ClientConfig, Session};
//!
//! async {
//!     let config = ClientConfig::new("my-client-id", "US");
//!     let session = Session::from_config(&config).unwrap();
//!
//!     let text = "听听这个 https://tidal.com/browse/track/22563749 还有 \
//!                 https://listen.tidal.com/album/22563744";
//!     for object in session.parse_urls(text).await.unwrap() {
//!         println!("{}: {}", object.tag(), object.id());
//!     }
//!
//!     let mut playlist = session
//!         .playlist("dcbab999-7523-4e2f-adf4-57d10fc17516")
//!         .await
//!         .unwrap();
//!     match playlist.tracks().await {
//!         Ok(tracks) => println!("歌单共 {} 首曲目。", tracks.len()),
//!         Err(e) => eprintln!("发生错误: {}", e),
//!     }
//! };
//! ```
pub mod accessor;
pub mod config;
pub mod error;
pub mod model;
pub mod resolver;
pub mod session;

pub use crate::{
    accessor::{HttpAccessor, RemoteAccessor, SeekableFile, SeekableFileFactory},
    config::ClientConfig,
    error::{Result, TidalError},
    model::{
        CatalogObject,
        album::Album,
        cover::Cover,
        entity::{Entity, EntityId},
        metadata::MetadataTags,
        playlist::Playlist,
        quality::{AudioMode, AudioQuality},
        track::Track,
    },
    resolver::Resolver,
    session::Session,
};
