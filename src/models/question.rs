use crate::models::difficulty::Difficulty;
use crate::models::label::Label;
use crate::utils::logging::truncate_text;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

/// 结构解析得到的题目（尚未打标）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub paper_id: Label,
    pub question_type: Label,
    pub question_number: u32,
    pub content: String,
}

impl ParsedQuestion {
    /// 附加标签和难度，得到完整题目
    pub fn classify(self, tags: TagSet, difficulty: Difficulty) -> Question {
        Question {
            paper_id: self.paper_id,
            question_type: self.question_type,
            question_number: self.question_number,
            content: self.content,
            tags,
            difficulty,
        }
    }
}

/// 知识点标签集合
///
/// 内部按规则目录声明顺序保存，仅用于展示；相等性按集合比较。
#[derive(Debug, Clone, Default, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加标签，已存在时忽略
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_set(&self) -> BTreeSet<&str> {
        self.iter().collect()
    }

    /// 以 ", " 连接；为空时返回 `fallback`
    pub fn render(&self, fallback: &str) -> String {
        if self.0.is_empty() {
            fallback.to_string()
        } else {
            self.0.join(", ")
        }
    }
}

impl PartialEq for TagSet {
    fn eq(&self, other: &Self) -> bool {
        self.to_set() == other.to_set()
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// 已打标的题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub paper_id: Label,
    pub question_type: Label,
    pub question_number: u32,
    pub content: String,
    pub tags: TagSet,
    pub difficulty: Difficulty,
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {} #{}] {} ({}, {})",
            self.paper_id,
            self.question_type,
            self.question_number,
            truncate_text(&self.content, 40),
            self.tags.render("-"),
            self.difficulty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_set_ignores_order_and_duplicates() {
        let a: TagSet = ["Tree", "Graph", "Tree"].into_iter().collect();
        let b: TagSet = ["Graph", "Tree"].into_iter().collect();
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
        assert_eq!(a.render("Other"), "Tree, Graph");
    }

    #[test]
    fn test_question_display_truncates_content() {
        let question = Question {
            paper_id: Label::Known("卷一".to_string()),
            question_type: Label::Known("选择题".to_string()),
            question_number: 3,
            content: "栈".repeat(50),
            tags: TagSet::new(),
            difficulty: Difficulty::Simple,
        };
        let expected = format!("[卷一 选择题 #3] {}... (-, Simple)", "栈".repeat(40));
        assert_eq!(question.to_string(), expected);
    }

    #[test]
    fn test_empty_tag_set_renders_fallback() {
        assert_eq!(TagSet::new().render("Other"), "Other");
    }
}
