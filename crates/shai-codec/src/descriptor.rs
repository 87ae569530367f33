//! 编解码器描述信息.
//!
//! 平台每次目录查询都会产生一份新的描述信息快照, 之后与平台对象生命周期无关.

use serde::{Deserialize, Serialize};
use shai_core::{CodecRole, MediaType};

/// 已安装编解码器的描述信息
///
/// 不可变记录, 由目录查询产生, 归调用方所有.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecDescriptor {
    /// 平台内唯一的实现名称 (如 "OMX.google.h264.decoder")
    pub name: String,
    /// 编码或解码
    pub role: CodecRole,
    /// 支持的媒体类型 (MIME 字符串)
    #[serde(rename = "types", default)]
    pub supported_types: Vec<String>,
}

impl CodecDescriptor {
    /// 创建描述信息
    pub fn new<I, S>(name: impl Into<String>, role: CodecRole, supported_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            role,
            supported_types: supported_types.into_iter().map(Into::into).collect(),
        }
    }

    /// 创建解码器描述信息
    pub fn decoder<I, S>(name: impl Into<String>, supported_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, CodecRole::Decoder, supported_types)
    }

    /// 创建编码器描述信息
    pub fn encoder<I, S>(name: impl Into<String>, supported_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, CodecRole::Encoder, supported_types)
    }

    /// 是否支持指定媒体类型
    ///
    /// 完整字符串比较, 忽略 ASCII 大小写. 不做前缀或通配匹配.
    pub fn supports(&self, media_type: &str) -> bool {
        self.supported_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(media_type))
    }

    /// 是否为指定媒体类型与角色的候选
    pub fn is_eligible(&self, media_type: &str, role: CodecRole) -> bool {
        self.role == role && self.supports(media_type)
    }

    /// 支持的媒体大类 (去重, 保持首次出现顺序)
    pub fn media_kinds(&self) -> Vec<MediaType> {
        let mut kinds = Vec::new();
        for kind in self
            .supported_types
            .iter()
            .filter_map(|t| MediaType::from_mime(t))
        {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }
}
