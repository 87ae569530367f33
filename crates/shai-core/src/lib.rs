//! # shai-core
//!
//! Shai (筛) 编解码器筛选框架核心库, 提供编解码器角色、媒体类型和统一错误类型.
//!
//! 本 crate 不依赖任何平台接口, 为 `shai-codec` 及命令行工具提供共享的基础定义.

pub mod codec_role;
pub mod error;
pub mod media_type;

// 重导出常用类型
pub use codec_role::CodecRole;
pub use error::{PlatformError, ShaiError, ShaiResult};
pub use media_type::MediaType;
