//! 统一错误类型定义.
//!
//! 编解码器选择流程中的所有失败原因都在此区分, 调用方按原因分支处理,
//! 而不是检查空值.

use thiserror::Error;

use crate::codec_role::CodecRole;

/// 平台原语返回的底层错误
///
/// 目录查询与按名称创建编解码器均由平台实现, 其错误类型各不相同, 统一装箱传递.
pub type PlatformError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Shai 框架统一错误类型
#[derive(Debug, Error)]
pub enum ShaiError {
    /// 平台编解码器枚举失败, 编解码子系统不可用
    #[error("编解码器目录不可用: {source}")]
    CatalogUnavailable {
        #[source]
        source: PlatformError,
    },

    /// 没有任何已安装编解码器 (无论是否被排除) 支持该媒体类型与角色
    #[error("未找到支持 {media_type} 的{role}")]
    NoEligibleCandidate { media_type: String, role: CodecRole },

    /// 存在支持该媒体类型的编解码器, 但全部命中排除规则
    #[error(
        "支持 {media_type} 的{role}均在排除列表中: {}",
        .excluded.join(", ")
    )]
    OnlyExcludedCandidatesAvailable {
        media_type: String,
        role: CodecRole,
        /// 被排除的候选名称, 按目录顺序
        excluded: Vec<String>,
    },

    /// 平台拒绝或未能实例化已选中的编解码器
    #[error("实例化编解码器 {name} 失败: {source}")]
    InstantiationFailed {
        name: String,
        #[source]
        source: PlatformError,
    },

    /// 无效参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),
}

impl ShaiError {
    /// 是否为 "设备不支持" 类错误 (与 "因已知缺陷被屏蔽" 区分)
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::NoEligibleCandidate { .. })
    }

    /// 是否因排除规则而失败
    pub fn is_blocked_by_exclusion(&self) -> bool {
        matches!(self, Self::OnlyExcludedCandidatesAvailable { .. })
    }
}

/// Shai 框架统一 Result 类型
pub type ShaiResult<T> = Result<T, ShaiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_仅排除候选的错误信息列出名称() {
        let err = ShaiError::OnlyExcludedCandidatesAvailable {
            media_type: "video/avc".into(),
            role: CodecRole::Decoder,
            excluded: vec!["OMX.Exynos.avc.dec".into(), "OMX.Exynos.avc.dec.secure".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("video/avc"));
        assert!(msg.contains("OMX.Exynos.avc.dec, OMX.Exynos.avc.dec.secure"));
        assert!(err.is_blocked_by_exclusion());
        assert!(!err.is_unsupported());
    }

    #[test]
    fn test_实例化失败保留底层错误() {
        let source: PlatformError = "资源不足".into();
        let err = ShaiError::InstantiationFailed {
            name: "OMX.google.h264.decoder".into(),
            source,
        };
        let inner = std::error::Error::source(&err).map(|e| e.to_string());
        assert_eq!(inner.as_deref(), Some("资源不足"));
    }
}
