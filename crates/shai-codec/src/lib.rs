//! # shai-codec
//!
//! 厂商感知的编解码器选择: 从平台已安装的编解码器中, 为指定媒体类型和角色
//! 选出第一个可用实现, 同时跳过已知在特定厂商硬件上存在缺陷的实现.
//!
//! ## 组成
//!
//! - **目录查询**: [`CodecCatalog`] / [`catalog::query`], 每次调用重新查询平台
//! - **排除规则**: [`ExclusionList`], 不区分大小写的名称片段匹配
//! - **选择器**: [`CodecResolver`], 过滤 → 分组 → 取首个允许项 → 按名称实例化
//! - **内置平台**: [`CodecRegistry`] (进程内注册表) 与 [`SnapshotCatalog`] (JSON 快照)
//!
//! ## 使用示例
//!
//! ```rust
//! use shai_codec::{CodecInstance, CodecRegistry, CodecResolver, GenericCodec};
//!
//! let mut reg = CodecRegistry::new();
//! reg.register_decoder("OMX.Exynos.avc.dec", ["video/avc"], GenericCodec::create);
//! reg.register_decoder("OMX.google.h264.decoder", ["video/avc"], GenericCodec::create);
//!
//! let resolver = CodecResolver::new(reg);
//! let decoder = resolver.resolve_decoder("video/avc").unwrap();
//! assert_eq!(decoder.name(), "OMX.google.h264.decoder");
//! assert!(resolver.has_excluded_decoder_candidate("video/avc").unwrap());
//! ```

pub mod catalog;
pub mod descriptor;
pub mod exclusion;
pub mod instance;
pub mod registry;
pub mod resolver;
pub mod snapshot;

// 重导出常用类型
pub use catalog::{CodecCatalog, CodecFactory, CodecPlatform};
pub use descriptor::CodecDescriptor;
pub use exclusion::{BUILTIN_EXCLUSIONS, ExclusionList, ExclusionRule};
pub use instance::{CodecInstance, GenericCodec};
pub use registry::CodecRegistry;
pub use resolver::{CandidateSet, CodecResolver};
pub use snapshot::{CatalogSnapshot, SnapshotCatalog};
