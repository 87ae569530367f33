//! 编解码器注册表.
//!
//! 进程内的平台实现: 按注册顺序保存编解码器描述信息与工厂函数,
//! 支持目录查询和按精确名称实例化. 注册顺序即目录顺序, 先注册者优先.

use shai_core::{CodecRole, PlatformError};

use crate::catalog::{CodecCatalog, CodecFactory};
use crate::descriptor::CodecDescriptor;
use crate::instance::CodecInstance;

/// 编解码器工厂函数类型
pub type InstanceFactory = fn(&CodecDescriptor) -> Result<Box<dyn CodecInstance>, PlatformError>;

/// 编解码器注册表
pub struct CodecRegistry {
    /// 注册条目, 保持注册顺序
    entries: Vec<RegistryEntry>,
}

/// 注册条目
struct RegistryEntry {
    /// 描述信息
    descriptor: CodecDescriptor,
    /// 工厂函数
    factory: InstanceFactory,
}

impl CodecRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 注册一个编解码器
    ///
    /// 同名条目只保留先注册的一个, 与平台名称唯一的约定一致.
    pub fn register(&mut self, descriptor: CodecDescriptor, factory: InstanceFactory) {
        if self.find(&descriptor.name).is_some() {
            log::warn!("编解码器 {} 已注册, 忽略重复注册", descriptor.name);
            return;
        }
        self.entries.push(RegistryEntry {
            descriptor,
            factory,
        });
    }

    /// 注册一个解码器
    pub fn register_decoder<I, S>(
        &mut self,
        name: impl Into<String>,
        supported_types: I,
        factory: InstanceFactory,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register(CodecDescriptor::decoder(name, supported_types), factory);
    }

    /// 注册一个编码器
    pub fn register_encoder<I, S>(
        &mut self,
        name: impl Into<String>,
        supported_types: I,
        factory: InstanceFactory,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.register(CodecDescriptor::encoder(name, supported_types), factory);
    }

    /// 获取所有已注册的解码器名称
    pub fn list_decoders(&self) -> Vec<&str> {
        self.names_with_role(CodecRole::Decoder)
    }

    /// 获取所有已注册的编码器名称
    pub fn list_encoders(&self) -> Vec<&str> {
        self.names_with_role(CodecRole::Encoder)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn names_with_role(&self, role: CodecRole) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.descriptor.role == role)
            .map(|e| e.descriptor.name.as_str())
            .collect()
    }

    fn find(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.descriptor.name == name)
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecCatalog for CodecRegistry {
    fn list_codecs(&self) -> Result<Vec<CodecDescriptor>, PlatformError> {
        Ok(self.entries.iter().map(|e| e.descriptor.clone()).collect())
    }
}

impl CodecFactory for CodecRegistry {
    type Handle = Box<dyn CodecInstance>;

    fn create_by_name(&self, name: &str) -> Result<Self::Handle, PlatformError> {
        let entry = self
            .find(name)
            .ok_or_else(|| format!("未注册的编解码器: {name}"))?;
        (entry.factory)(&entry.descriptor)
    }
}
