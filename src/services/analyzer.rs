//! 统计分析 - 业务能力层
//!
//! 生成标签×难度交叉表、各分卷题目分布、难度分布、题型分布和分卷×标签分布。

use crate::models::{Difficulty, Question};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// 题型分布最多展示的条数
const TOP_QUESTION_TYPES: usize = 10;

/// 统计结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_questions: usize,
    /// 标签 → 难度 → 题目数
    pub tag_by_difficulty: BTreeMap<String, BTreeMap<String, usize>>,
    /// 分卷 → 题目数
    pub per_paper: BTreeMap<String, usize>,
    /// 难度 → 题目数
    pub difficulty_counts: BTreeMap<String, usize>,
    /// 出现最多的题型（按数量降序）
    pub top_question_types: Vec<(String, usize)>,
    /// 分卷 → 标签 → 题目数
    pub paper_by_tag: BTreeMap<String, BTreeMap<String, usize>>,
}

/// 生成统计结果，没有标签的题目计入 `untagged_label`
pub fn analyze(questions: &[Question], untagged_label: &str) -> Statistics {
    let mut stats = Statistics {
        total_questions: questions.len(),
        ..Default::default()
    };
    let mut type_counts: BTreeMap<String, usize> = BTreeMap::new();

    for question in questions {
        let paper = question.paper_id.to_string();
        let difficulty = question.difficulty.as_str().to_string();

        *stats.per_paper.entry(paper.clone()).or_default() += 1;
        *stats.difficulty_counts.entry(difficulty.clone()).or_default() += 1;
        *type_counts.entry(question.question_type.to_string()).or_default() += 1;

        let tags: Vec<&str> = if question.tags.is_empty() {
            vec![untagged_label]
        } else {
            question.tags.iter().collect()
        };
        for tag in tags {
            *stats
                .tag_by_difficulty
                .entry(tag.to_string())
                .or_default()
                .entry(difficulty.clone())
                .or_default() += 1;
            *stats
                .paper_by_tag
                .entry(paper.clone())
                .or_default()
                .entry(tag.to_string())
                .or_default() += 1;
        }
    }

    let mut types: Vec<(String, usize)> = type_counts.into_iter().collect();
    // 数量降序，同数量按题型名排序
    types.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    types.truncate(TOP_QUESTION_TYPES);
    stats.top_question_types = types;

    stats
}

impl Statistics {
    /// 输出统计报告到日志
    pub fn log_report(&self) {
        info!("\n{}", "=".repeat(70));
        info!("📊 统计分析报告");
        info!("{}", "=".repeat(70));

        info!("\n【知识点标签 × 难度 交叉统计】");
        for (tag, row) in &self.tag_by_difficulty {
            let cells: Vec<String> = Difficulty::ALL
                .iter()
                .map(|d| format!("{}={}", d, row.get(d.as_str()).copied().unwrap_or(0)))
                .collect();
            info!("   {:<20} {}", tag, cells.join("  "));
        }

        info!("\n【各分卷题目分布】");
        for (paper, count) in &self.per_paper {
            info!("   {}: {} 道", paper, count);
        }

        info!("\n【难度分布】");
        for (difficulty, count) in &self.difficulty_counts {
            info!("   {}: {}", difficulty, count);
        }

        info!("\n【题型分布 (Top {})】", TOP_QUESTION_TYPES);
        for (question_type, count) in &self.top_question_types {
            info!("   {}: {}", question_type, count);
        }

        info!("\n【各分卷的知识点分布】");
        for (paper, tags) in &self.paper_by_tag {
            let cells: Vec<String> = tags.iter().map(|(t, c)| format!("{}={}", t, c)).collect();
            info!("   {}: {}", paper, cells.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Label, TagSet};

    fn question(paper: &str, question_type: &str, tags: &[&str], difficulty: Difficulty) -> Question {
        Question {
            paper_id: Label::Known(paper.to_string()),
            question_type: Label::Known(question_type.to_string()),
            question_number: 1,
            content: "内容".to_string(),
            tags: tags.iter().copied().collect::<TagSet>(),
            difficulty,
        }
    }

    #[test]
    fn test_analyze_counts() {
        let questions = vec![
            question("卷一", "选择题", &["Tree", "Graph"], Difficulty::Simple),
            question("卷一", "选择题", &["Tree"], Difficulty::Simple),
            question("卷二", "应用题", &[], Difficulty::Medium),
        ];

        let stats = analyze(&questions, "Other");
        assert_eq!(stats.total_questions, 3);
        assert_eq!(stats.per_paper["卷一"], 2);
        assert_eq!(stats.difficulty_counts["Simple"], 2);
        assert_eq!(stats.tag_by_difficulty["Tree"]["Simple"], 2);
        assert_eq!(stats.tag_by_difficulty["Other"]["Medium"], 1);
        assert_eq!(stats.paper_by_tag["卷一"]["Graph"], 1);
        assert_eq!(
            stats.top_question_types,
            vec![("选择题".to_string(), 2), ("应用题".to_string(), 1)]
        );
    }

    #[test]
    fn test_analyze_empty() {
        let stats = analyze(&[], "Other");
        assert_eq!(stats, Statistics::default());
    }
}
