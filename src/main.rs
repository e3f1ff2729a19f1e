use anyhow::Result;
use clap::{Parser, Subcommand};
use exam_etl::utils::logging;
use exam_etl::{App, Config, Subject};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "exam_etl")]
#[command(about = "通用试题ETL处理工具（支持多学科）", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 处理单份试卷的页面文本
    Run {
        /// 页面文本文件（.toml 或 .txt）
        #[arg(short = 'p', long)]
        pages: Option<PathBuf>,

        /// 输出CSV文件路径
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 学科ID (auto=自动检测, default=通用模式)
        #[arg(short, long)]
        subject: Option<String>,

        /// 自定义规则目录所在文件夹
        #[arg(long)]
        catalog_dir: Option<PathBuf>,

        /// 题目内容最小长度
        #[arg(long)]
        min_length: Option<usize>,

        /// 题目内容最大长度
        #[arg(long)]
        max_length: Option<usize>,

        /// 以JSON输出统计结果
        #[arg(long)]
        json: bool,

        /// 显示详细日志
        #[arg(short, long)]
        verbose: bool,
    },
    /// 列出所有支持的学科
    Subjects,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            pages,
            output,
            subject,
            catalog_dir,
            min_length,
            max_length,
            json,
            verbose,
        } => {
            // 命令行参数覆盖环境变量
            let mut config = Config::from_env();
            config.pages_path = pages.or(config.pages_path);
            config.output_csv = output.unwrap_or(config.output_csv);
            config.subject = subject.unwrap_or(config.subject);
            config.catalog_dir = catalog_dir.or(config.catalog_dir);
            config.min_content_length = min_length.unwrap_or(config.min_content_length);
            config.max_content_length = max_length.unwrap_or(config.max_content_length);
            config.verbose_logging |= verbose;

            logging::init(config.verbose_logging);

            let summary = App::initialize(config).await?.run()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary.statistics)?);
            }
        }
        Commands::Subjects => {
            println!("{}", "=".repeat(70));
            println!("📚 支持的学科列表");
            println!("{}", "=".repeat(70));
            for subject in Subject::ALL {
                println!("  {:15} - {} ({})", subject.id(), subject.name(), subject.catalog_name());
            }
            println!("{}", "=".repeat(70));
        }
    }

    Ok(())
}
