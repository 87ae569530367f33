//! 编解码器选择器.
//!
//! 按媒体类型与角色从平台目录中挑选可用的编解码器, 跳过命中排除规则的实现.
//!
//! 选择流程:
//! 1. 查询平台目录
//! 2. 过滤出角色一致且支持该媒体类型的候选
//! 3. 按排除规则分为 "允许" 与 "排除" 两组
//! 4. 取允许组中目录顺序的第一个
//! 5. 按该候选的精确名称实例化 (不按类型创建, 否则平台可能返回被排除的实现)
//!
//! 选择器不缓存目录, 每次调用都是独立的一次选择.

use shai_core::{CodecRole, ShaiError, ShaiResult};

use crate::catalog::{self, CodecPlatform};
use crate::descriptor::CodecDescriptor;
use crate::exclusion::ExclusionList;

/// 一次目录查询得到的候选分组
///
/// 两组均保持平台目录顺序.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    /// 请求的媒体类型
    pub media_type: String,
    /// 请求的角色
    pub role: CodecRole,
    /// 未命中排除规则的候选
    pub allowed: Vec<CodecDescriptor>,
    /// 命中排除规则的候选
    pub excluded: Vec<CodecDescriptor>,
}

impl CandidateSet {
    /// 从目录快照中筛选并分组
    pub fn partition(
        codecs: Vec<CodecDescriptor>,
        media_type: &str,
        role: CodecRole,
        exclusions: &ExclusionList,
    ) -> Self {
        let (excluded, allowed): (Vec<_>, Vec<_>) = codecs
            .into_iter()
            .filter(|desc| desc.is_eligible(media_type, role))
            .partition(|desc| exclusions.is_excluded(&desc.name));
        Self {
            media_type: media_type.to_string(),
            role,
            allowed,
            excluded,
        }
    }

    /// 是否存在被排除的候选
    pub fn has_excluded(&self) -> bool {
        !self.excluded.is_empty()
    }

    /// 没有任何候选 (包括被排除的)
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty() && self.excluded.is_empty()
    }

    /// 首选候选
    pub fn first_allowed(&self) -> Option<&CodecDescriptor> {
        self.allowed.first()
    }

    /// 被排除候选的名称
    pub fn excluded_names(&self) -> Vec<String> {
        self.excluded.iter().map(|d| d.name.clone()).collect()
    }

    /// 取出首选候选
    ///
    /// 允许组为空时不会回退到被排除的实现.
    pub fn into_selection(self) -> ShaiResult<CodecDescriptor> {
        if let Some(first) = self.allowed.into_iter().next() {
            return Ok(first);
        }
        if self.excluded.is_empty() {
            Err(ShaiError::NoEligibleCandidate {
                media_type: self.media_type,
                role: self.role,
            })
        } else {
            Err(ShaiError::OnlyExcludedCandidatesAvailable {
                media_type: self.media_type,
                role: self.role,
                excluded: self.excluded.into_iter().map(|d| d.name).collect(),
            })
        }
    }
}

/// 编解码器选择器
///
/// 持有平台与不可变的排除规则, 本身无可变状态.
/// 平台为 `Send + Sync` 时可在多线程间共享.
#[derive(Debug, Clone)]
pub struct CodecResolver<P> {
    platform: P,
    exclusions: ExclusionList,
}

impl<P: CodecPlatform> CodecResolver<P> {
    /// 使用内置排除表创建
    pub fn new(platform: P) -> Self {
        Self::with_exclusions(platform, ExclusionList::builtin())
    }

    /// 使用指定排除规则创建
    pub fn with_exclusions(platform: P, exclusions: ExclusionList) -> Self {
        Self {
            platform,
            exclusions,
        }
    }

    /// 底层平台
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// 当前排除规则
    pub fn exclusions(&self) -> &ExclusionList {
        &self.exclusions
    }

    /// 查询目录并返回候选分组 (不实例化)
    pub fn candidates(&self, media_type: &str, role: CodecRole) -> ShaiResult<CandidateSet> {
        let codecs = catalog::query(&self.platform)?;
        let set = CandidateSet::partition(codecs, media_type, role, &self.exclusions);
        log::debug!(
            "{media_type} {role}: 允许 {} 个, 排除 {} 个",
            set.allowed.len(),
            set.excluded.len()
        );
        for desc in &set.excluded {
            if let Some(rule) = self.exclusions.find_match(&desc.name) {
                log::debug!("跳过 {} (命中排除规则 {})", desc.name, rule.pattern());
            }
        }
        Ok(set)
    }

    /// 选出首选候选 (不实例化)
    pub fn select(&self, media_type: &str, role: CodecRole) -> ShaiResult<CodecDescriptor> {
        self.candidates(media_type, role)?.into_selection()
    }

    /// 选出并实例化编解码器
    ///
    /// 实例化失败直接返回 [`ShaiError::InstantiationFailed`], 不尝试下一个候选.
    pub fn resolve(&self, media_type: &str, role: CodecRole) -> ShaiResult<P::Handle> {
        self.instantiate(self.select(media_type, role)?)
    }

    /// 按精确名称实例化已选出的候选
    ///
    /// 与 [`candidates`](Self::candidates) 配合使用, 可在一次目录查询内
    /// 同时拿到被跳过的候选与实例.
    pub fn instantiate(&self, selected: CodecDescriptor) -> ShaiResult<P::Handle> {
        log::debug!("选中 {}: {}", selected.role, selected.name);
        self.platform
            .create_by_name(&selected.name)
            .map_err(|source| ShaiError::InstantiationFailed {
                name: selected.name,
                source,
            })
    }

    /// 是否存在命中排除规则的候选 (只读诊断, 不实例化)
    ///
    /// 调用方据此决定上层的回退策略, 例如是否提示用户.
    pub fn has_excluded_candidate(&self, media_type: &str, role: CodecRole) -> ShaiResult<bool> {
        Ok(self.candidates(media_type, role)?.has_excluded())
    }

    /// 选出并实例化解码器
    pub fn resolve_decoder(&self, media_type: &str) -> ShaiResult<P::Handle> {
        self.resolve(media_type, CodecRole::Decoder)
    }

    /// 选出并实例化编码器
    pub fn resolve_encoder(&self, media_type: &str) -> ShaiResult<P::Handle> {
        self.resolve(media_type, CodecRole::Encoder)
    }

    /// 是否存在被排除的解码器候选
    pub fn has_excluded_decoder_candidate(&self, media_type: &str) -> ShaiResult<bool> {
        self.has_excluded_candidate(media_type, CodecRole::Decoder)
    }

    /// 是否存在被排除的编码器候选
    pub fn has_excluded_encoder_candidate(&self, media_type: &str) -> ShaiResult<bool> {
        self.has_excluded_candidate(media_type, CodecRole::Encoder)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use shai_core::PlatformError;

    use super::*;
    use crate::catalog::{CodecCatalog, CodecFactory};

    /// 记录创建请求的测试平台
    struct FakePlatform {
        codecs: Vec<CodecDescriptor>,
        fail_create: bool,
        created: RefCell<Vec<String>>,
    }

    impl FakePlatform {
        fn new(codecs: Vec<CodecDescriptor>) -> Self {
            Self {
                codecs,
                fail_create: false,
                created: RefCell::new(Vec::new()),
            }
        }
    }

    impl CodecCatalog for FakePlatform {
        fn list_codecs(&self) -> Result<Vec<CodecDescriptor>, PlatformError> {
            Ok(self.codecs.clone())
        }
    }

    impl CodecFactory for FakePlatform {
        type Handle = String;

        fn create_by_name(&self, name: &str) -> Result<String, PlatformError> {
            self.created.borrow_mut().push(name.to_string());
            if self.fail_create {
                return Err("insufficient resources".into());
            }
            Ok(name.to_string())
        }
    }

    fn avc_catalog() -> Vec<CodecDescriptor> {
        vec![
            CodecDescriptor::decoder("OMX.google.h264.decoder", ["video/avc"]),
            CodecDescriptor::decoder("OMX.Exynos.h264.decoder", ["video/avc"]),
        ]
    }

    #[test]
    fn test_跳过被排除的解码器() {
        let resolver = CodecResolver::new(FakePlatform::new(avc_catalog()));
        let handle = resolver.resolve_decoder("video/avc").unwrap();
        assert_eq!(handle, "OMX.google.h264.decoder");
    }

    #[test]
    fn test_排除项排在前面时仍选允许项() {
        let mut codecs = avc_catalog();
        codecs.reverse();
        let resolver = CodecResolver::new(FakePlatform::new(codecs));
        assert_eq!(
            resolver.resolve_decoder("video/avc").unwrap(),
            "OMX.google.h264.decoder"
        );
    }

    #[test]
    fn test_仅有排除候选时失败() {
        let platform = FakePlatform::new(vec![CodecDescriptor::decoder(
            "OMX.Exynos.h264.decoder",
            ["video/avc"],
        )]);
        let resolver = CodecResolver::new(platform);
        match resolver.resolve_decoder("video/avc") {
            Err(ShaiError::OnlyExcludedCandidatesAvailable { excluded, role, .. }) => {
                assert_eq!(excluded, ["OMX.Exynos.h264.decoder"]);
                assert_eq!(role, CodecRole::Decoder);
            }
            other => panic!("期望 OnlyExcludedCandidatesAvailable, 实际 {other:?}"),
        }
        assert!(resolver.platform().created.borrow().is_empty());
    }

    #[test]
    fn test_空目录无候选() {
        let resolver = CodecResolver::new(FakePlatform::new(Vec::new()));
        let err = resolver.resolve_encoder("video/hevc").unwrap_err();
        assert!(matches!(
            err,
            ShaiError::NoEligibleCandidate { ref media_type, role: CodecRole::Encoder }
                if media_type == "video/hevc"
        ));
    }

    #[test]
    fn test_角色不一致不参与选择() {
        let platform = FakePlatform::new(vec![
            CodecDescriptor::encoder("OMX.google.h264.encoder", ["video/avc"]),
            CodecDescriptor::decoder("OMX.google.h264.decoder", ["video/avc"]),
        ]);
        let resolver = CodecResolver::new(platform);
        assert_eq!(
            resolver.resolve_decoder("video/avc").unwrap(),
            "OMX.google.h264.decoder"
        );
        assert_eq!(
            resolver.resolve_encoder("video/avc").unwrap(),
            "OMX.google.h264.encoder"
        );
    }

    #[test]
    fn test_实例化失败不尝试下一个候选() {
        let mut platform = FakePlatform::new(vec![
            CodecDescriptor::decoder("OMX.google.h264.decoder", ["video/avc"]),
            CodecDescriptor::decoder("c2.android.avc.decoder", ["video/avc"]),
        ]);
        platform.fail_create = true;
        let resolver = CodecResolver::new(platform);
        match resolver.resolve_decoder("video/avc") {
            Err(ShaiError::InstantiationFailed { name, source }) => {
                assert_eq!(name, "OMX.google.h264.decoder");
                assert_eq!(source.to_string(), "insufficient resources");
            }
            other => panic!("期望 InstantiationFailed, 实际 {other:?}"),
        }
        assert_eq!(
            *resolver.platform().created.borrow(),
            ["OMX.google.h264.decoder"]
        );
    }

    #[test]
    fn test_单次查询分组后实例化() {
        let resolver = CodecResolver::new(FakePlatform::new(avc_catalog()));
        let set = resolver.candidates("video/avc", CodecRole::Decoder).unwrap();
        let excluded = set.excluded_names();
        let handle = resolver.instantiate(set.into_selection().unwrap()).unwrap();
        assert_eq!(handle, "OMX.google.h264.decoder");
        assert_eq!(excluded, ["OMX.Exynos.h264.decoder"]);
        assert_eq!(
            *resolver.platform().created.borrow(),
            ["OMX.google.h264.decoder"]
        );
    }

    #[test]
    fn test_诊断查询不实例化() {
        let resolver = CodecResolver::new(FakePlatform::new(avc_catalog()));
        assert!(resolver.has_excluded_decoder_candidate("video/avc").unwrap());
        assert!(!resolver.has_excluded_encoder_candidate("video/avc").unwrap());
        assert!(!resolver.has_excluded_decoder_candidate("audio/opus").unwrap());
        assert!(resolver.platform().created.borrow().is_empty());
    }

    #[test]
    fn test_注入空排除表() {
        let platform = FakePlatform::new(vec![CodecDescriptor::decoder(
            "OMX.Exynos.h264.decoder",
            ["video/avc"],
        )]);
        let resolver = CodecResolver::with_exclusions(platform, ExclusionList::empty());
        assert_eq!(
            resolver.resolve_decoder("video/avc").unwrap(),
            "OMX.Exynos.h264.decoder"
        );
        assert!(!resolver.has_excluded_decoder_candidate("video/avc").unwrap());
    }

    #[test]
    fn test_媒体类型匹配忽略大小写() {
        let resolver = CodecResolver::new(FakePlatform::new(avc_catalog()));
        let selected = resolver.select("Video/AVC", CodecRole::Decoder).unwrap();
        assert_eq!(selected.name, "OMX.google.h264.decoder");
    }

    #[test]
    fn test_空媒体类型视为无候选() {
        let resolver = CodecResolver::new(FakePlatform::new(avc_catalog()));
        for media_type in ["", " "] {
            assert!(matches!(
                resolver.resolve_decoder(media_type),
                Err(ShaiError::NoEligibleCandidate { .. })
            ));
            assert!(!resolver.has_excluded_decoder_candidate(media_type).unwrap());
            assert!(!resolver.has_excluded_encoder_candidate(media_type).unwrap());
        }
        assert!(resolver.platform().created.borrow().is_empty());
    }

    #[test]
    fn test_候选分组保持目录顺序() {
        let codecs = vec![
            CodecDescriptor::decoder("OMX.Exynos.a", ["audio/opus"]),
            CodecDescriptor::decoder("c2.android.opus.decoder", ["audio/opus"]),
            CodecDescriptor::decoder("OMX.exynos.b", ["audio/opus"]),
            CodecDescriptor::decoder("c2.vendor.opus.decoder", ["audio/opus"]),
        ];
        let set = CandidateSet::partition(
            codecs,
            "audio/opus",
            CodecRole::Decoder,
            &ExclusionList::builtin(),
        );
        assert_eq!(set.excluded_names(), ["OMX.Exynos.a", "OMX.exynos.b"]);
        assert_eq!(
            set.first_allowed().map(|d| d.name.as_str()),
            Some("c2.android.opus.decoder")
        );
        assert!(set.has_excluded());
        assert!(!set.is_empty());
    }
}
