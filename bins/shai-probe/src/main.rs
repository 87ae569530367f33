//! shai-probe - 编解码器目录探测工具
//!
//! 读取设备导出的编解码器目录快照, 列出编解码器、演练选择过程,
//! 并报告某媒体类型是否存在被排除的候选.

mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process;

use shai_codec::{
    CandidateSet, CodecDescriptor, CodecInstance, CodecResolver, ExclusionList, SnapshotCatalog,
};
use shai_core::{CodecRole, MediaType, ShaiError};

/// Shai 编解码器目录探测工具
#[derive(Parser, Debug)]
#[command(name = "shai-probe", version, about = "厂商感知的编解码器选择演练工具")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// 日志级别 (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 列出快照中的编解码器, 标记命中排除规则的条目
    List {
        /// 目录快照文件 (JSON)
        catalog: PathBuf,

        /// 只列出指定角色
        #[arg(long, value_enum)]
        role: Option<RoleArg>,

        #[command(flatten)]
        exclusions: ExclusionArgs,

        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 为媒体类型选择并实例化编解码器
    Resolve(SelectArgs),
    /// 检查媒体类型是否存在被排除的候选
    Check(SelectArgs),
}

#[derive(Args, Debug)]
struct SelectArgs {
    /// 目录快照文件 (JSON)
    catalog: PathBuf,

    /// 媒体类型 (如 "video/avc")
    media_type: String,

    /// 编解码器角色
    #[arg(short, long, value_enum, default_value_t = RoleArg::Decoder)]
    role: RoleArg,

    #[command(flatten)]
    exclusions: ExclusionArgs,

    /// 输出 JSON 格式
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ExclusionArgs {
    /// 追加排除的名称片段 (可重复)
    #[arg(long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// 不使用内置排除表
    #[arg(long)]
    no_builtin: bool,
}

impl ExclusionArgs {
    fn build(&self) -> Result<ExclusionList> {
        let base = if self.no_builtin {
            ExclusionList::empty()
        } else {
            ExclusionList::builtin()
        };
        self.exclude
            .iter()
            .try_fold(base, |list, pattern| list.with_pattern(pattern.as_str()))
            .context("排除规则无效")
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum RoleArg {
    Decoder,
    Encoder,
}

impl From<RoleArg> for CodecRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Decoder => CodecRole::Decoder,
            RoleArg::Encoder => CodecRole::Encoder,
        }
    }
}

// ============================================================
// JSON 输出结构体
// ============================================================

/// 目录条目
#[derive(Serialize)]
struct CodecEntry {
    name: String,
    role: CodecRole,
    types: Vec<String>,
    kinds: Vec<MediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    excluded_by: Option<String>,
}

impl CodecEntry {
    fn new(desc: CodecDescriptor, exclusions: &ExclusionList) -> Self {
        Self {
            excluded_by: exclusions
                .find_match(&desc.name)
                .map(|rule| rule.pattern().to_string()),
            kinds: desc.media_kinds(),
            name: desc.name,
            role: desc.role,
            types: desc.supported_types,
        }
    }

    /// 文本输出的一行
    fn line(&self) -> String {
        let kinds = if self.kinds.is_empty() {
            "-".to_string()
        } else {
            self.kinds
                .iter()
                .map(MediaType::to_string)
                .collect::<Vec<_>>()
                .join("/")
        };
        let mark = match &self.excluded_by {
            Some(pattern) => format!("  [排除: {pattern}]"),
            None => String::new(),
        };
        format!(
            "  {:<7} {:<40} {:<6} {}{mark}",
            self.role.as_str(),
            self.name,
            kinds,
            self.types.join(", ")
        )
    }
}

/// 选择结果
#[derive(Debug, Serialize)]
struct ResolveOutput {
    media_type: String,
    role: CodecRole,
    selected: String,
    excluded: Vec<String>,
}

/// 诊断结果
#[derive(Serialize)]
struct CheckOutput {
    media_type: String,
    role: CodecRole,
    has_excluded_candidate: bool,
    allowed: Vec<String>,
    excluded: Vec<String>,
}

// ============================================================
// 主逻辑
// ============================================================

fn main() {
    let cli = Cli::parse();
    if let Err(err) = logging::init("shai-probe", cli.verbose) {
        eprintln!("警告: 日志初始化失败: {err:#}");
    }

    if let Err(err) = run(cli.command) {
        tracing::debug!("执行失败: {err:?}");
        eprintln!("错误: {err:#}");
        process::exit(exit_code(&err));
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::List {
            catalog,
            role,
            exclusions,
            json,
        } => list(catalog, role.map(CodecRole::from), &exclusions.build()?, json),
        Command::Resolve(args) => resolve(args),
        Command::Check(args) => check(args),
    }
}

/// 按失败原因区分退出码
fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ShaiError>() {
        Some(ShaiError::CatalogUnavailable { .. }) => 2,
        Some(ShaiError::NoEligibleCandidate { .. }) => 3,
        Some(ShaiError::OnlyExcludedCandidatesAvailable { .. }) => 4,
        Some(ShaiError::InstantiationFailed { .. }) => 5,
        _ => 1,
    }
}

fn list(
    path: PathBuf,
    role: Option<CodecRole>,
    exclusions: &ExclusionList,
    json: bool,
) -> Result<()> {
    let catalog = SnapshotCatalog::new(path);
    let codecs = shai_codec::catalog::query(&catalog)?;

    let entries: Vec<CodecEntry> = codecs
        .into_iter()
        .filter(|d| role.is_none_or(|r| d.role == r))
        .map(|d| CodecEntry::new(d, exclusions))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("共 {} 个编解码器 ({})", entries.len(), catalog.path().display());
    for entry in &entries {
        println!("{}", entry.line());
    }
    Ok(())
}

fn resolve(args: SelectArgs) -> Result<()> {
    let output = select_and_create(&args)?;
    let role = output.role;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} {}: {}", output.media_type, role.as_str(), output.selected);
    if !output.excluded.is_empty() {
        println!("已跳过: {}", output.excluded.join(", "));
    }
    Ok(())
}

/// 一次目录查询内完成分组与实例化, 跳过列表与选中结果来自同一份目录
fn select_and_create(args: &SelectArgs) -> Result<ResolveOutput> {
    let role = CodecRole::from(args.role);
    let resolver = build_resolver(args)?;

    let set = resolver.candidates(&args.media_type, role)?;
    let excluded = set.excluded_names();
    let codec = resolver.instantiate(set.into_selection()?)?;
    tracing::info!("{} {}: 选中 {}", args.media_type, role, codec.name());

    Ok(ResolveOutput {
        media_type: args.media_type.clone(),
        role,
        selected: codec.name().to_string(),
        excluded,
    })
}

fn check(args: SelectArgs) -> Result<()> {
    let role = CodecRole::from(args.role);
    let resolver = build_resolver(&args)?;
    let set: CandidateSet = resolver.candidates(&args.media_type, role)?;

    let output = CheckOutput {
        has_excluded_candidate: set.has_excluded(),
        allowed: set.allowed.iter().map(|d| d.name.clone()).collect(),
        excluded: set.excluded_names(),
        media_type: set.media_type,
        role,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} {}: {}",
        output.media_type,
        role.as_str(),
        if output.has_excluded_candidate {
            "存在被排除的候选"
        } else {
            "无被排除的候选"
        }
    );
    println!("  允许: {}", join_or_dash(&output.allowed));
    println!("  排除: {}", join_or_dash(&output.excluded));
    Ok(())
}

fn build_resolver(args: &SelectArgs) -> Result<CodecResolver<SnapshotCatalog>> {
    let exclusions = args.exclusions.build()?;
    let catalog = SnapshotCatalog::new(&args.catalog);
    tracing::debug!(
        "目录快照 {}, 排除规则 {} 条",
        catalog.path().display(),
        exclusions.len()
    );
    Ok(CodecResolver::with_exclusions(catalog, exclusions))
}

fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
