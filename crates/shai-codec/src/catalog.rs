//! 平台编解码器目录与创建原语.
//!
//! 平台需要提供两个原语:
//! - 目录查询: 列出当前安装的全部编解码器 ([`CodecCatalog`])
//! - 按精确名称创建编解码器实例 ([`CodecFactory`])
//!
//! 两者合起来即 [`CodecPlatform`]. 选择器只通过这两个 trait 访问平台.

use std::sync::Arc;

use shai_core::{PlatformError, ShaiError, ShaiResult};

use crate::descriptor::CodecDescriptor;

/// 平台编解码器目录查询原语
///
/// 每次调用都重新查询平台当前状态并返回独立快照, 实现不应跨调用缓存.
pub trait CodecCatalog {
    /// 列出当前安装的全部编解码器, 顺序由平台决定
    fn list_codecs(&self) -> Result<Vec<CodecDescriptor>, PlatformError>;
}

/// 平台编解码器创建原语
pub trait CodecFactory {
    /// 已实例化的编解码器句柄, 创建后所有权归调用方
    type Handle;

    /// 按精确实现名称创建编解码器
    fn create_by_name(&self, name: &str) -> Result<Self::Handle, PlatformError>;
}

/// 同时提供目录查询与创建原语的平台
pub trait CodecPlatform: CodecCatalog + CodecFactory {}

impl<T: CodecCatalog + CodecFactory + ?Sized> CodecPlatform for T {}

impl<T: CodecCatalog + ?Sized> CodecCatalog for &T {
    fn list_codecs(&self) -> Result<Vec<CodecDescriptor>, PlatformError> {
        (**self).list_codecs()
    }
}

impl<T: CodecFactory + ?Sized> CodecFactory for &T {
    type Handle = T::Handle;

    fn create_by_name(&self, name: &str) -> Result<Self::Handle, PlatformError> {
        (**self).create_by_name(name)
    }
}

impl<T: CodecCatalog + ?Sized> CodecCatalog for Arc<T> {
    fn list_codecs(&self) -> Result<Vec<CodecDescriptor>, PlatformError> {
        (**self).list_codecs()
    }
}

impl<T: CodecFactory + ?Sized> CodecFactory for Arc<T> {
    type Handle = T::Handle;

    fn create_by_name(&self, name: &str) -> Result<Self::Handle, PlatformError> {
        (**self).create_by_name(name)
    }
}

/// 查询平台目录
///
/// 平台查询失败映射为 [`ShaiError::CatalogUnavailable`], 不重试.
pub fn query<C: CodecCatalog + ?Sized>(catalog: &C) -> ShaiResult<Vec<CodecDescriptor>> {
    let codecs = catalog
        .list_codecs()
        .map_err(|source| ShaiError::CatalogUnavailable { source })?;
    log::trace!("平台目录共 {} 个编解码器", codecs.len());
    Ok(codecs)
}
