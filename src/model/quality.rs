//! 定义了服务端使用的音质与声道模式词汇。

use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::TidalError;

/// 曲目的音质等级。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, EnumString, Display, AsRefStr,
)]
pub enum AudioQuality {
    /// 有损低码率。
    #[strum(serialize = "LOW")]
    Normal,
    /// 有损高码率。
    #[strum(serialize = "HIGH")]
    High,
    /// CD 音质无损。
    #[strum(serialize = "LOSSLESS")]
    HiFi,
    /// 高解析度无损。
    #[default]
    #[strum(serialize = "HI_RES")]
    Master,
}

impl AudioQuality {
    /// 解析服务端返回的原始字符串。
    pub fn parse(raw: &str) -> Result<Self, TidalError> {
        Self::from_str(raw).map_err(|_| TidalError::InvalidEnumValue {
            kind: "AudioQuality",
            value: raw.to_string(),
        })
    }
}

/// 声道模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
pub enum AudioMode {
    /// 立体声。
    #[strum(serialize = "STEREO")]
    Stereo,
}

impl AudioMode {
    /// 解析服务端返回的原始字符串。
    pub fn parse(raw: &str) -> Result<Self, TidalError> {
        Self::from_str(raw).map_err(|_| TidalError::InvalidEnumValue {
            kind: "AudioMode",
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_vocabulary() {
        assert_eq!(AudioQuality::parse("LOW").unwrap(), AudioQuality::Normal);
        assert_eq!(AudioQuality::parse("HIGH").unwrap(), AudioQuality::High);
        assert_eq!(AudioQuality::parse("LOSSLESS").unwrap(), AudioQuality::HiFi);
        assert_eq!(AudioQuality::parse("HI_RES").unwrap(), AudioQuality::Master);
        assert_eq!(AudioQuality::Master.as_ref(), "HI_RES");
    }

    #[test]
    fn test_unknown_quality_is_rejected() {
        let err = AudioQuality::parse("GARBAGE").unwrap_err();
        assert!(matches!(
            err,
            TidalError::InvalidEnumValue { kind: "AudioQuality", ref value } if value == "GARBAGE"
        ));
        // 大小写敏感
        assert!(AudioQuality::parse("lossless").is_err());
    }

    #[test]
    fn test_audio_mode() {
        assert_eq!(AudioMode::parse("STEREO").unwrap(), AudioMode::Stereo);
        assert!(AudioMode::parse("DOLBY_ATMOS").is_err());
    }
}
