//! 题目标签和难度评估 - 业务能力层
//!
//! 纯函数：输入题目内容/题型和规则目录，输出标签集合/难度，不持有可变状态。

use crate::catalog::{DifficultyRule, PatternCatalog, TagRule};
use crate::models::{Difficulty, Label, ParsedQuestion, Question, TagSet};

/// 基于关键词打标签
///
/// 每个标签只要有任一关键词作为子串出现即命中，多个标签可同时命中。
pub fn assign_tags(content: &str, tags: &[TagRule]) -> TagSet {
    tags.iter()
        .filter(|rule| rule.matches(content))
        .map(|rule| rule.name.as_str())
        .collect()
}

/// 查找题型对应的难度
///
/// 先精确匹配，再按声明顺序查找包含在题型中的键；都未命中返回 `None`。
pub fn lookup_difficulty(question_type: &str, table: &[DifficultyRule]) -> Option<Difficulty> {
    table
        .iter()
        .find(|rule| rule.question_type == question_type)
        .or_else(|| {
            table
                .iter()
                .find(|rule| !rule.question_type.is_empty() && question_type.contains(&rule.question_type))
        })
        .map(|rule| rule.level)
}

/// 判断难度，未知题型返回默认难度
pub fn get_difficulty(question_type: &str, table: &[DifficultyRule], default: Difficulty) -> Difficulty {
    lookup_difficulty(question_type, table).unwrap_or(default)
}

/// 题目打标器
pub struct QuestionClassifier<'c> {
    catalog: &'c PatternCatalog,
}

impl<'c> QuestionClassifier<'c> {
    pub fn new(catalog: &'c PatternCatalog) -> Self {
        Self { catalog }
    }

    pub fn assign_tags(&self, content: &str) -> TagSet {
        assign_tags(content, &self.catalog.tags)
    }

    pub fn get_difficulty(&self, question_type: &Label) -> Difficulty {
        match question_type {
            Label::Known(t) => get_difficulty(t, &self.catalog.difficulty, self.catalog.default_difficulty),
            Label::Unknown => self.catalog.default_difficulty,
        }
    }

    /// 为单道题目打标签并评估难度
    pub fn classify(&self, question: ParsedQuestion) -> Question {
        let tags = self.assign_tags(&question.content);
        let difficulty = self.get_difficulty(&question.question_type);
        question.classify(tags, difficulty)
    }
}
