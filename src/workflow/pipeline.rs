//! 单份试卷处理流程
//!
//! 页面文本 → 结构解析 → 题目提取 → 打标 → `ExamReport`

use crate::catalog::PatternCatalog;
use crate::models::{Question, Section};
use crate::services::classifier::QuestionClassifier;
use crate::services::parser::{DropCounts, LengthBounds, StructuralParser};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// 一个部分及其题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub section: Section,
    pub questions: Vec<Question>,
    pub dropped: DropCounts,
}

/// 整份试卷的处理结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamReport {
    pub sections: Vec<SectionReport>,
}

impl ExamReport {
    /// 按原文顺序遍历所有题目
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.sections.into_iter().flat_map(|s| s.questions).collect()
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn dropped(&self) -> DropCounts {
        let mut total = DropCounts::default();
        for section in &self.sections {
            total.merge(section.dropped);
        }
        total
    }
}

/// 试卷处理流程
pub struct ExamPipeline<'c> {
    parser: StructuralParser<'c>,
    classifier: QuestionClassifier<'c>,
}

impl<'c> ExamPipeline<'c> {
    pub fn new(catalog: &'c PatternCatalog, bounds: LengthBounds) -> Self {
        Self {
            parser: StructuralParser::new(catalog, bounds),
            classifier: QuestionClassifier::new(catalog),
        }
    }

    /// 处理一份试卷的全部页面
    pub fn run<S: AsRef<str>>(&self, pages: &[S]) -> ExamReport {
        info!("\n📋 识别试卷结构...");
        let sections = self.parser.identify_sections(pages);

        info!("\n🏷️  提取题目并打标...");
        let sections: Vec<SectionReport> = sections
            .into_iter()
            .map(|section| {
                let extraction = self.parser.extract_questions(&section);
                let questions: Vec<Question> = extraction
                    .questions
                    .into_iter()
                    .map(|q| self.classifier.classify(q))
                    .collect();
                for q in &questions {
                    debug!("{}", q);
                }
                SectionReport {
                    section,
                    questions,
                    dropped: extraction.dropped,
                }
            })
            .collect();

        let report = ExamReport { sections };
        log_report_summary(&report);
        report
    }
}

fn log_report_summary(report: &ExamReport) {
    info!("   ✅ 共提取 {} 道题目", report.question_count());

    let dropped = report.dropped();
    if dropped.total() > 0 {
        info!(
            "   ⚠️ 丢弃 {} 段 (过短 {}, 过长 {}, 无效 {})",
            dropped.total(),
            dropped.too_short,
            dropped.too_long,
            dropped.noise
        );
    }

    let mut per_paper: BTreeMap<&str, usize> = BTreeMap::new();
    for question in report.questions() {
        *per_paper.entry(question.paper_id.as_str()).or_default() += 1;
    }
    if !per_paper.is_empty() {
        info!("\n   各分卷题目数:");
        for (paper, count) in per_paper {
            info!("      {}: {} 道", paper, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, Label, TagSet};

    #[test]
    fn test_scenario_end_to_end() {
        let catalog = PatternCatalog::builtin("data_structure").unwrap();
        let pipeline = ExamPipeline::new(&catalog, LengthBounds::new(2, 800));
        let pages = ["卷一\n一、选择题\n1. 二叉树的遍历方式有哪些？\n2. 求最短路径"];

        let report = pipeline.run(&pages);
        assert_eq!(report.sections.len(), 1);
        let questions: Vec<&Question> = report.questions().collect();
        assert_eq!(questions.len(), 2);

        assert_eq!(questions[0].paper_id, Label::Known("卷一".to_string()));
        assert_eq!(questions[0].question_type, Label::Known("选择题".to_string()));
        assert_eq!(questions[0].tags, TagSet::from_iter(["Tree"]));
        assert_eq!(questions[1].tags, TagSet::from_iter(["Graph"]));
        assert_eq!(questions[0].difficulty, Difficulty::Simple);
        assert_eq!(questions[1].difficulty, Difficulty::Simple);
    }

    #[test]
    fn test_every_question_satisfies_length_bounds() {
        let catalog = PatternCatalog::builtin("default").unwrap();
        let bounds = LengthBounds::new(4, 12);
        let pipeline = ExamPipeline::new(&catalog, bounds);
        let pages = [
            "卷一\n一、选择题\n1. 短\n2. 刚好合适的长度\n3. 这一道题目的内容明显超过了十二个字符",
            "二、应用题\n1. 进程调度算法比较",
        ];

        let report = pipeline.run(&pages);
        for question in report.questions() {
            assert!(bounds.contains(question.content.chars().count()));
        }
        assert_eq!(report.dropped().too_short, 1);
        assert_eq!(report.dropped().too_long, 1);
        assert_eq!(report.question_count(), 2);
    }

    #[test]
    fn test_run_is_idempotent() {
        let catalog = PatternCatalog::builtin("computer_organization").unwrap();
        let pipeline = ExamPipeline::new(&catalog, LengthBounds::default());
        let pages = ["卷一\n一、选择题\n1. 补码表示的范围是多少\n2. Cache 的命中率如何计算"];

        assert_eq!(pipeline.run(&pages), pipeline.run(&pages));
    }
}
