//! 应用编排
//!
//! 负责加载页面、确定学科和规则目录、执行处理流程、导出和统计。

use crate::catalog::PatternCatalog;
use crate::config::Config;
use crate::error::{AppError, AppResult, ConfigError};
use crate::models::{load_pages, PageDocument, Subject};
use crate::services::analyzer::{analyze, Statistics};
use crate::services::exporter::CsvExporter;
use crate::services::parser::{DropCounts, LengthBounds};
use crate::services::subject_detector;
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::ExamPipeline;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
    document: PageDocument,
    subject: Subject,
    catalog: PatternCatalog,
}

/// 处理结果汇总
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub questions: usize,
    pub dropped: DropCounts,
    pub statistics: Statistics,
}

impl App {
    /// 初始化应用：校验配置、加载页面、确定学科和规则目录
    pub async fn initialize(config: Config) -> Result<Self> {
        let pages_path = config.validate()?.to_path_buf();

        info!("\n📖 读取页面文本...");
        let document = load_pages(&pages_path).await?;

        let subject = resolve_subject(&config, &document)?;
        log_startup(&pages_path, subject, &config.output_csv);

        let catalog = PatternCatalog::load(subject.catalog_name(), config.catalog_dir.as_deref())
            .await
            .with_context(|| format!("无法加载学科 {} 的规则目录", subject.id()))?;

        Ok(Self {
            config,
            document,
            subject,
            catalog,
        })
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// 运行应用主逻辑
    pub fn run(&self) -> Result<RunSummary> {
        let bounds = LengthBounds::new(self.config.min_content_length, self.config.max_content_length);
        let pipeline = ExamPipeline::new(&self.catalog, bounds);

        let report = pipeline.run(&self.document.pages);
        let dropped = report.dropped();
        let questions = report.into_questions();

        info!("\n💾 保存到CSV...");
        let exporter = CsvExporter::new(&self.config.output_csv);
        exporter
            .save(&questions, &self.catalog.untagged_label)
            .with_context(|| format!("导出失败: {}", exporter.output_path().display()))?;

        let statistics = analyze(&questions, &self.catalog.untagged_label);
        statistics.log_report();

        print_final_stats(questions.len(), dropped.total(), &self.config.output_csv);

        Ok(RunSummary {
            questions: questions.len(),
            dropped,
            statistics,
        })
    }
}

/// 手动指定学科时按ID解析，否则根据文档名和正文自动检测
fn resolve_subject(config: &Config, document: &PageDocument) -> AppResult<Subject> {
    if config.auto_detect() {
        return Ok(subject_detector::detect(
            Path::new(&document.name),
            &document.full_text(),
        ));
    }
    Subject::from_id(&config.subject).ok_or_else(|| {
        AppError::from(ConfigError::UnknownSubject {
            subject: config.subject.clone(),
        })
    })
}
