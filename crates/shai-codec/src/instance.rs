//! 编解码器实例句柄.
//!
//! 内置平台 ([`crate::CodecRegistry`], [`crate::SnapshotCatalog`]) 创建的句柄类型.
//! 真实平台可使用自己的句柄类型, 选择器对句柄内容不做任何假设.

use std::fmt;

use shai_core::{CodecRole, PlatformError};

use crate::descriptor::CodecDescriptor;

/// 已实例化的编解码器
pub trait CodecInstance: Send + fmt::Debug {
    /// 实现名称, 与目录中的描述信息一致
    fn name(&self) -> &str;

    /// 编码或解码
    fn role(&self) -> CodecRole;
}

/// 仅携带描述信息的通用编解码器实例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericCodec {
    descriptor: CodecDescriptor,
}

impl GenericCodec {
    /// 由描述信息创建
    pub fn new(descriptor: CodecDescriptor) -> Self {
        Self { descriptor }
    }

    /// 注册表工厂函数: 直接返回通用实例
    pub fn create(descriptor: &CodecDescriptor) -> Result<Box<dyn CodecInstance>, PlatformError> {
        Ok(Box::new(Self::new(descriptor.clone())))
    }

    /// 对应的描述信息
    pub fn descriptor(&self) -> &CodecDescriptor {
        &self.descriptor
    }
}

impl CodecInstance for GenericCodec {
    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn role(&self) -> CodecRole {
        self.descriptor.role
    }
}
