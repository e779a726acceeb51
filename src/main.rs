// main.rs
// 配置查看工具：读取可选的JSON配置文件，应用命令行覆盖后打印有效的数据集配置和训练超参数。
use anyhow::{bail, Context, Result};
use clap::Parser;
use prettytable::{row, Table};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use train_config::{ConfigSchema, DatasetConfig, HyperParameters};

#[derive(Debug, Parser)]
#[command(about = "打印分割模型训练的有效配置")]
struct Args {
    /// 数据集配置JSON文件
    #[arg(long)]
    dataset: Option<PathBuf>,
    /// 超参数配置JSON文件
    #[arg(long)]
    hyper: Option<PathBuf>,
    /// 覆盖字段，格式为 SECTION.KEY=VALUE，SECTION 为 dataset 或 hyper
    #[arg(long = "set", value_name = "SECTION.KEY=VALUE")]
    overrides: Vec<String>,
    /// 以JSON格式输出
    #[arg(long)]
    json: bool,
    /// 输出debug日志
    #[arg(short, long)]
    verbose: bool,
}

/// 按配置段分组的命令行覆盖
#[derive(Debug, Default)]
struct Overrides {
    dataset: Map<String, Value>,
    hyper: Map<String, Value>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose)?;

    let overrides = parse_overrides(&args.overrides)?;
    let dataset: DatasetConfig = load(args.dataset.as_deref(), &overrides.dataset)?;
    let hyper: HyperParameters = load(args.hyper.as_deref(), &overrides.hyper)?;

    if args.json {
        let out = serde_json::json!({
            "dataset": dataset.to_json_value(),
            "hyper": hyper.to_json_value(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_table(&dataset);
        print_table(&hyper);
    }
    Ok(())
}

fn init_logger(verbose: bool) -> Result<()> {
    let level = if verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::ConfigBuilder::new()
            .set_time_format_rfc3339()
            .add_filter_allow("train_config".to_owned())
            .add_filter_allow("segmentation_config".to_owned())
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    Ok(())
}

/// 解析 `SECTION.KEY=VALUE`，值一律按字符串交给库做宽松转换
fn parse_overrides(items: &[String]) -> Result<Overrides> {
    let mut overrides = Overrides::default();
    for item in items {
        let Some((path, value)) = item.split_once('=') else {
            bail!("覆盖项缺少 '=': {}", item);
        };
        let Some((section, key)) = path.split_once('.') else {
            bail!("覆盖项缺少配置段前缀: {}", item);
        };
        let target = match section {
            "dataset" => &mut overrides.dataset,
            "hyper" => &mut overrides.hyper,
            other => bail!("未知配置段 '{}'，应为 dataset 或 hyper", other),
        };
        target.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(overrides)
}

fn load<T: ConfigSchema>(path: Option<&Path>, overrides: &Map<String, Value>) -> Result<T> {
    let base = match path {
        Some(p) => T::from_json_file(p).with_context(|| format!("读取 {} 失败: {}", T::NAME, p.display()))?,
        None => T::default(),
    };
    let config = base
        .apply_overrides(overrides)
        .with_context(|| format!("{} 的命令行覆盖无效", T::NAME))?;
    log::debug!("{} 加载完成", T::NAME);
    Ok(config)
}

fn print_table<T: ConfigSchema>(config: &T) {
    let value = config.to_json_value();
    let mut table = Table::new();
    table.add_row(row![T::NAME, ""]);
    for field in T::FIELDS {
        let shown = match &value[*field] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        table.add_row(row![field, shown]);
    }
    table.printstd();
}
