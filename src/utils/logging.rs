/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use crate::models::Subject;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug 或 info 级别。
/// 重复初始化（例如测试中）会被忽略。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `pages_path`: 页面文本文件
/// - `subject`: 学科
/// - `output_csv`: 输出CSV路径
pub fn log_startup(pages_path: &Path, subject: Subject, output_csv: &Path) {
    info!("\n{}", "=".repeat(70));
    info!(
        "📄 处理文件: {}",
        pages_path.file_name().unwrap_or_default().to_string_lossy()
    );
    info!("🕒 开始时间: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("{}", "=".repeat(70));
    info!("📚 学科: {}", subject);
    info!("📁 输出: {}", output_csv.display());
}

/// 打印最终统计信息
///
/// # 参数
/// - `questions`: 导出的题目数
/// - `dropped`: 丢弃的片段数
/// - `output_csv`: 输出CSV路径
pub fn print_final_stats(questions: usize, dropped: usize, output_csv: &Path) {
    info!("\n{}", "=".repeat(70));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 完成! 提取 {} 道题目", questions);
    info!("⚠️ 丢弃: {}", dropped);
    info!("{}", "=".repeat(70));
    info!("\n结果已保存至: {}", output_csv.display());
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
