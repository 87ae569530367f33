//! 编解码器排除规则.
//!
//! 部分厂商自带的编解码器在编码、解码或其他处理上存在已知缺陷.
//! 名称包含排除模式 (不区分大小写) 的实现永远不会被选中.
//!
//! 新增一个需要屏蔽的厂商只需在 [`BUILTIN_EXCLUSIONS`] 中追加一项.

use std::fmt;

use shai_core::{ShaiError, ShaiResult};

/// 内置排除表: (名称片段, 说明)
///
/// 只要能唯一区分, 可以只写名称的一部分.
pub const BUILTIN_EXCLUSIONS: &[(&str, &str)] = &[
    // Samsung 厂商编解码器
    ("Exynos", "Samsung Exynos 厂商编解码器"),
];

/// 单条排除规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    /// 原始模式
    pattern: String,
    /// 小写后的模式, 用于匹配
    folded: String,
    /// 说明
    note: Option<String>,
}

impl ExclusionRule {
    /// 创建排除规则
    ///
    /// 空模式会匹配所有编解码器, 视为无效参数.
    pub fn new(pattern: impl Into<String>) -> ShaiResult<Self> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(ShaiError::InvalidArgument(
                "排除规则的名称片段不能为空".into(),
            ));
        }
        Ok(Self {
            folded: pattern.to_lowercase(),
            pattern,
            note: None,
        })
    }

    /// 由编译期常量创建, 不经过校验
    fn from_static(pattern: &'static str, note: &'static str) -> Self {
        debug_assert!(!pattern.trim().is_empty(), "内置排除表含空模式");
        Self {
            pattern: pattern.to_string(),
            folded: pattern.to_lowercase(),
            note: Some(note.to_string()),
        }
    }

    /// 附加说明
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// 原始模式
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// 说明
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// 编解码器名称是否命中此规则 (子串包含, 不区分大小写)
    pub fn matches(&self, codec_name: &str) -> bool {
        codec_name.to_lowercase().contains(&self.folded)
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.note {
            Some(note) => write!(f, "{} ({note})", self.pattern),
            None => write!(f, "{}", self.pattern),
        }
    }
}

/// 排除规则集合
///
/// 构造后不可变, 在创建选择器时注入.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    rules: Vec<ExclusionRule>,
}

impl ExclusionList {
    /// 不包含任何规则的集合
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// 内置排除表
    pub fn builtin() -> Self {
        let rules = BUILTIN_EXCLUSIONS
            .iter()
            .map(|&(pattern, note)| ExclusionRule::from_static(pattern, note))
            .collect();
        Self { rules }
    }

    /// 由模式列表创建
    pub fn from_patterns<I, S>(patterns: I) -> ShaiResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rules = patterns
            .into_iter()
            .map(ExclusionRule::new)
            .collect::<ShaiResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// 追加一条规则, 返回新集合
    pub fn with_rule(mut self, rule: ExclusionRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// 追加一个模式, 返回新集合
    pub fn with_pattern(self, pattern: impl Into<String>) -> ShaiResult<Self> {
        Ok(self.with_rule(ExclusionRule::new(pattern)?))
    }

    /// 全部规则
    pub fn rules(&self) -> &[ExclusionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 返回编解码器名称命中的第一条规则
    pub fn find_match(&self, codec_name: &str) -> Option<&ExclusionRule> {
        self.rules.iter().find(|rule| rule.matches(codec_name))
    }

    /// 编解码器名称是否被排除
    pub fn is_excluded(&self, codec_name: &str) -> bool {
        self.find_match(codec_name).is_some()
    }
}
