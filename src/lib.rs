//! # Exam ETL
//!
//! 将试卷页面文本转换为结构化题目表，并为每道题打上知识点标签和难度
//!
//! ## 架构设计
//!
//! ### ① 规则目录（Catalog）
//! - `catalog/` - 标题规则、题目起始规则、标签关键词表、难度映射表
//! - 由 TOML 定义，内置 default / data_structure / computer_organization
//!
//! ### ② 业务能力层（Services）
//! - `StructuralParser` - 识别卷/题型，切分题目
//! - `QuestionClassifier` - 关键词打标、题型定难度
//! - `subject_detector` - 学科检测
//! - `CsvExporter` / `analyzer` - 导出和统计
//!
//! ### ③ 流程层（Workflow）
//! - `ExamPipeline` - 一份试卷的完整处理流程（解析 → 提取 → 打标）
//!
//! ### ④ 编排层（App）
//! - `App` - 加载页面、选择规则目录、执行流程、导出、统计
//!
//! ## 模块结构

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::{App, RunSummary};
pub use catalog::PatternCatalog;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Difficulty, Label, ParsedQuestion, Question, Section, Subject, TagSet};
pub use services::{LengthBounds, QuestionClassifier, StructuralParser};
pub use workflow::{ExamPipeline, ExamReport};
