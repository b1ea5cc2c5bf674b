//! 封面图片。

use crate::{
    accessor::SeekableFile,
    error::{Result, TidalError},
    session::Session,
};

const IMAGE_BASE_URL: &str = "https://resources.tidal.com/images";

/// 服务端支持的封面边长（像素）。宽和高都必须取自这个集合。
pub const COVER_DIMENSIONS: [u32; 5] = [80, 160, 320, 640, 1280];

/// 默认的封面尺寸。
pub const DEFAULT_COVER_SIZE: (u32, u32) = (640, 640);

/// 一张封面图片。只是 ID 的包装，不会从 API 加载。
#[derive(Debug, Clone)]
pub struct Cover {
    session: Session,
    id: String,
}

impl Cover {
    /// 用图片 ID 创建封面。
    pub fn new(session: Session, id: impl Into<String>) -> Self {
        Self {
            session,
            id: id.into(),
        }
    }

    /// 图片 ID，例如 `"abc-def-ghi"`。
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 判断尺寸是否受服务端支持。
    pub fn is_supported_size((width, height): (u32, u32)) -> bool {
        COVER_DIMENSIONS.contains(&width) && COVER_DIMENSIONS.contains(&height)
    }

    /// 生成指定尺寸的图片地址，不检查尺寸。
    ///
    /// 传入不受支持的尺寸时，得到的地址通常无法访问。
    pub fn url(&self, (width, height): (u32, u32)) -> String {
        format!(
            "{IMAGE_BASE_URL}/{}/{width}x{height}.jpg",
            self.id.replace('-', "/")
        )
    }

    /// 生成指定尺寸的图片地址。尺寸不受支持时返回错误。
    pub fn checked_url(&self, size: (u32, u32)) -> Result<String> {
        if !Self::is_supported_size(size) {
            return Err(TidalError::UnsupportedResolution(size.0, size.1));
        }
        Ok(self.url(size))
    }

    /// 通过会话注入的文件工厂打开封面图片。
    ///
    /// 未提供文件名时使用 `{id}.jpg`。
    pub async fn get_file(
        &self,
        filename: Option<&str>,
        size: (u32, u32),
    ) -> Result<Box<dyn SeekableFile>> {
        let factory = self.session.file_factory().ok_or_else(|| {
            TidalError::UnsupportedOperation("会话未提供文件工厂".to_string())
        })?;
        let url = self.checked_url(size)?;
        let filename = filename
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}.jpg", self.id));
        factory.open(&url, &filename).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::offline_session;

    #[test]
    fn test_url_replaces_dashes_with_slashes() {
        let cover = Cover::new(offline_session(), "abc-def-ghi");
        let url = cover.url((640, 640));
        assert!(url.ends_with("/abc/def/ghi/640x640.jpg"), "{url}");
        assert_eq!(
            url,
            "https://resources.tidal.com/images/abc/def/ghi/640x640.jpg"
        );
    }

    #[test]
    fn test_checked_url_validates_size() {
        let cover = Cover::new(offline_session(), "abc-def");
        assert!(cover.checked_url((1280, 1280)).is_ok());
        assert!(cover.checked_url((80, 160)).is_ok());
        assert!(matches!(
            cover.checked_url((500, 500)),
            Err(TidalError::UnsupportedResolution(500, 500))
        ));
    }

    #[tokio::test]
    async fn test_get_file_without_factory_is_unsupported() {
        let cover = Cover::new(offline_session(), "abc-def");
        let result = cover.get_file(None, DEFAULT_COVER_SIZE).await;
        assert!(matches!(result, Err(TidalError::UnsupportedOperation(_))));
    }
}
