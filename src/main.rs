// ==========================================
// 零售需求分析看板 - 命令行入口
// ==========================================
// 子命令: generate / ingest / transform / plan / dashboard / run-all
// 视图输出: stdout（JSON）;日志: stderr
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use retail_demand_analytics::config::{ConfigManager, PathsConfig};
use retail_demand_analytics::engine::DedupPolicy;
use retail_demand_analytics::{logging, DashboardApi, PipelineOrchestrator, APP_NAME, VERSION};
use serde::Serialize;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "retail-demand-analytics", version, about = "零售需求分析看板 - 数据生成与对账聚合")]
struct Cli {
    /// JSON 配置文件（扁平 key-value）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 覆写原始数据目录
    #[arg(long, global = true)]
    raw_dir: Option<PathBuf>,

    /// 覆写输出目录（看板读取目录）
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// 以 JSON 格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 生成合成原始数据（sku_map / pos_sales / ecommerce_sales / inventory）
    Generate,
    /// 读取原始数据并写出数据质量报告
    Ingest,
    /// 生成产品维表与日粒度销售事实
    Transform {
        /// 剔除完全相同的重复销售行
        #[arg(long)]
        dedup: bool,
    },
    /// 基于预测生成首周生产计划
    Plan,
    /// 输出看板视图（JSON）
    Dashboard {
        #[arg(value_enum)]
        view: View,
        /// 预测视图选定的 SKU
        #[arg(long)]
        sku: Option<String>,
    },
    /// 串行执行全流程并写出流水线报告
    RunAll,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum View {
    Overview,
    Catalog,
    SalesPlan,
    Forecast,
    Planning,
    Collection,
}

fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }
    tracing::debug!("{} v{}", APP_NAME, VERSION);

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::from_file(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => ConfigManager::new(),
    };

    let mut paths = manager.paths_config();
    apply_path_overrides(&mut paths, &cli);

    let orchestrator = PipelineOrchestrator::new(
        manager.generator_config()?,
        manager.planner_config()?,
        paths.clone(),
    );

    match cli.command {
        Commands::Generate => {
            let summary = orchestrator.run_generate()?;
            print_json(&summary.files)?;
        }
        Commands::Ingest => {
            let outcome = orchestrator.run_ingest()?;
            print_json(&outcome.dq.summary)?;
        }
        Commands::Transform { dedup } => {
            let policy = if dedup {
                DedupPolicy::DropExact
            } else {
                DedupPolicy::KeepAll
            };
            let orchestrator = orchestrator.with_dedup(policy);
            let ingest = orchestrator.run_ingest()?;
            let outcome = orchestrator.run_transform(&ingest)?;
            print_json(&outcome.files)?;
        }
        Commands::Plan => {
            let ingest = orchestrator.run_ingest()?;
            match orchestrator.run_plan(&ingest)? {
                Some(plan) => print_json(&plan)?,
                None => tracing::warn!("未生成生产计划"),
            }
        }
        Commands::Dashboard { view, sku } => {
            let api = DashboardApi::new(&paths.output_dir);
            match view {
                View::Overview => print_json(&api.overview()?)?,
                View::Catalog => print_json(&api.catalog()?)?,
                View::SalesPlan => print_json(&api.sales_plan()?)?,
                View::Forecast => print_json(&api.forecast(sku.as_deref())?)?,
                View::Planning => print_json(&api.planning()?)?,
                View::Collection => print_json(&api.collection_catalog()?)?,
            }
        }
        Commands::RunAll => {
            let report = orchestrator.run_all()?;
            print_json(&report)?;
        }
    }
    Ok(())
}

fn apply_path_overrides(paths: &mut PathsConfig, cli: &Cli) {
    if let Some(raw_dir) = &cli.raw_dir {
        paths.raw_dir = raw_dir.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        paths.output_dir = output_dir.clone();
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
