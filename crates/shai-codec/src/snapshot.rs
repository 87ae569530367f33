//! 基于 JSON 目录快照的平台实现.
//!
//! 快照文件由设备端导出的编解码器列表生成, 格式:
//!
//! ```json
//! {
//!   "codecs": [
//!     { "name": "OMX.google.h264.decoder", "role": "decoder", "types": ["video/avc"] }
//!   ]
//! }
//! ```
//!
//! 每次目录查询都重新读取文件, 不做缓存.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shai_core::PlatformError;

use crate::catalog::{CodecCatalog, CodecFactory};
use crate::descriptor::CodecDescriptor;
use crate::instance::GenericCodec;

/// 快照文件内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// 编解码器列表, 顺序即平台目录顺序
    pub codecs: Vec<CodecDescriptor>,
}

impl CatalogSnapshot {
    /// 从 JSON 文本解析
    pub fn from_json(text: &str) -> Result<Self, PlatformError> {
        Ok(serde_json::from_str(text)?)
    }

    /// 序列化为 JSON 文本
    pub fn to_json_pretty(&self) -> Result<String, PlatformError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// JSON 快照目录
#[derive(Debug, Clone)]
pub struct SnapshotCatalog {
    path: PathBuf,
}

impl SnapshotCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 快照文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取并解析快照文件
    pub fn load(&self) -> Result<CatalogSnapshot, PlatformError> {
        let text = fs::read_to_string(&self.path)
            .map_err(|e| format!("读取目录快照失败, path={}: {e}", self.path.display()))?;
        CatalogSnapshot::from_json(&text)
            .map_err(|e| format!("解析目录快照失败, path={}: {e}", self.path.display()).into())
    }
}

impl CodecCatalog for SnapshotCatalog {
    fn list_codecs(&self) -> Result<Vec<CodecDescriptor>, PlatformError> {
        Ok(self.load()?.codecs)
    }
}

impl CodecFactory for SnapshotCatalog {
    type Handle = GenericCodec;

    fn create_by_name(&self, name: &str) -> Result<GenericCodec, PlatformError> {
        let descriptor = self
            .load()?
            .codecs
            .into_iter()
            .find(|d| d.name == name)
            .ok_or_else(|| format!("快照中不存在编解码器: {name}"))?;
        Ok(GenericCodec::new(descriptor))
    }
}
