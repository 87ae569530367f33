//! 编解码器角色定义.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 编解码器角色: 编码或解码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecRole {
    /// 编码器
    Encoder,
    /// 解码器
    Decoder,
}

impl CodecRole {
    /// 英文标识, 与序列化名称一致
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Encoder => "encoder",
            Self::Decoder => "decoder",
        }
    }
}

impl fmt::Display for CodecRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Encoder => "编码器",
            Self::Decoder => "解码器",
        };
        write!(f, "{name}")
    }
}
