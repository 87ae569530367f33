//! # Shai (筛)
//!
//! 厂商感知的编解码器选择库.
//!
//! 给定媒体类型和角色 (编码/解码), 从平台已安装的编解码器中选出可用实现,
//! 并跳过已知在特定厂商硬件上存在缺陷的实现 (如 Samsung Exynos).
//!
//! # 快速开始
//!
//! ```rust
//! use shai::codec::{CodecInstance, CodecRegistry, GenericCodec};
//!
//! let mut platform = CodecRegistry::new();
//! platform.register_decoder("OMX.Exynos.avc.dec", ["video/avc"], GenericCodec::create);
//! platform.register_decoder("OMX.google.h264.decoder", ["video/avc"], GenericCodec::create);
//!
//! let resolver = shai::default_resolver(platform);
//! let decoder = resolver.resolve_decoder("video/avc").unwrap();
//! println!("选中: {}", decoder.name());
//! ```
//!
//! # Crate 结构
//!
//! | Crate | 功能 |
//! |-------|------|
//! | `shai-core` | 角色、媒体类型、统一错误 |
//! | `shai-codec` | 目录查询、排除规则、选择器、内置平台 |

/// 核心类型与错误
pub use shai_core as core;

/// 目录查询与编解码器选择
pub use shai_codec as codec;

/// 获取 Shai 版本号
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// 创建使用内置排除表的选择器
pub fn default_resolver<P: codec::CodecPlatform>(platform: P) -> codec::CodecResolver<P> {
    codec::CodecResolver::new(platform)
}
