//! 媒体类型分类.
//!
//! 平台以 MIME 字符串 (如 `video/avc`) 标识编解码格式, 此处仅按顶级类型归类,
//! 供展示和日志使用. 编解码器匹配始终比较完整 MIME 字符串.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 媒体类型大类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// 视频
    Video,
    /// 音频
    Audio,
    /// 字幕 / 文本轨
    Subtitle,
}

impl MediaType {
    /// 按 MIME 顶级类型归类, 无法识别时返回 `None`
    pub fn from_mime(mime: &str) -> Option<Self> {
        let (top, _) = mime.split_once('/')?;
        if top.eq_ignore_ascii_case("video") || top.eq_ignore_ascii_case("image") {
            Some(Self::Video)
        } else if top.eq_ignore_ascii_case("audio") {
            Some(Self::Audio)
        } else if top.eq_ignore_ascii_case("text") || top.eq_ignore_ascii_case("application") {
            Some(Self::Subtitle)
        } else {
            None
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Video => "视频",
            Self::Audio => "音频",
            Self::Subtitle => "字幕",
        };
        write!(f, "{name}")
    }
}
