// ==========================================
// 商品目录对账导出 - 命令行入口
// ==========================================
// 用法: catalog-export [--config FILE] [--db PATH] [--pricelist PATH] ...
// 退出码: 0 成功 / 1 失败（未写出任何文件）
// ==========================================

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use catalog_export::api::{ApiError, ExportApi, ExportOptions};
use catalog_export::config::{CatalogConfig, ConfigManager};
use catalog_export::logging;

/// 合并数据库、价目表与品牌表，导出店面目录 JSON
#[derive(Parser, Debug)]
#[command(name = "catalog-export", version, about)]
struct Cli {
    /// JSON 配置文件（缺省使用内置配置）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// SQLite 商品库路径
    #[arg(long)]
    db: Option<PathBuf>,

    /// 价目表路径（.xlsx/.xls/.ods/.csv）
    #[arg(long)]
    pricelist: Option<PathBuf>,

    /// 品牌表路径
    #[arg(long)]
    brands: Option<PathBuf>,

    /// 本地图片根目录
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// 输出目录
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// 仅合并与校验，不写文件
    #[arg(long)]
    dry_run: bool,

    /// 同时写出 export_report.json
    #[arg(long)]
    report: bool,

    /// 日志输出为 JSON 行
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    /// 命令行路径覆盖配置文件
    fn apply_overrides(&self, config: &mut CatalogConfig) {
        if let Some(db) = &self.db {
            config.sources.db_path = db.clone();
        }
        if let Some(pricelist) = &self.pricelist {
            config.sources.pricelist_path = pricelist.clone();
        }
        if let Some(brands) = &self.brands {
            config.sources.brands_path = brands.clone();
        }
        if let Some(dir) = &self.images_dir {
            config.images.local_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("错误: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = ConfigManager::load_or_default(cli.config.as_deref())
        .context("配置加载失败")?
        .into_config();
    cli.apply_overrides(&mut config);
    let config = ConfigManager::from_config(config)
        .context("配置校验失败")?
        .into_config();

    tracing::info!("{} v{}", catalog_export::APP_NAME, catalog_export::VERSION);

    let api = ExportApi::new(config);
    let options = ExportOptions {
        dry_run: cli.dry_run,
        write_report: cli.report,
    };

    let summary = match api.export(options) {
        Ok(summary) => summary,
        Err(ApiError::ValidationFailed { violations }) => {
            for violation in &violations {
                eprintln!("  - {}", violation);
            }
            anyhow::bail!("目录校验失败: {} 项违规，未写出任何文件", violations.len());
        }
        Err(e) => return Err(e.into()),
    };

    // === 类目汇总 ===
    for line in &summary.report.summary {
        println!("{}", line);
    }
    println!(
        "共 {} 个商品, {} 个类目",
        summary.report.products_written, summary.report.categories_written
    );

    let stats = &summary.report.stats;
    if !stats.dropped.is_empty() {
        println!("剔除 {} 个商品（无可用类目）", stats.dropped.len());
    }

    match &summary.written {
        Some(written) => {
            println!("已写出: {}", written.categories.display());
            println!("已写出: {}", written.products.display());
        }
        None => println!("dry-run: 未写出文件"),
    }
    if let Some(path) = &summary.report_path {
        println!("报告: {}", path.display());
    }

    Ok(())
}
