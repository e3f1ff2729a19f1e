//! 编译后的匹配规则
//!
//! 每条规则是 (优先级, 匹配器, 标签) 的组合，由规则目录按声明顺序保存。

use crate::error::{AppError, AppResult, CatalogError};
use crate::models::{Difficulty, Label};
use regex::Regex;

/// 标题规则命中结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderHit {
    /// 命中的规则名
    pub rule: String,
    pub paper: Option<Label>,
    pub question_type: Option<Label>,
}

/// 卷名/题型标题规则，使用命名捕获 `paper` 和 `type`
#[derive(Debug, Clone)]
pub struct HeaderRule {
    pub label: String,
    regex: Regex,
}

impl HeaderRule {
    pub fn new(label: impl Into<String>, pattern: &str) -> AppResult<Self> {
        let label = label.into();
        let regex = Regex::new(pattern)
            .map_err(|e| AppError::invalid_pattern(label.clone(), pattern, e))?;

        let names: Vec<&str> = regex.capture_names().flatten().collect();
        if !names.contains(&"paper") && !names.contains(&"type") {
            return Err(CatalogError::MissingCapture {
                label,
                expected: "paper/type".to_string(),
            }
            .into());
        }

        Ok(Self { label, regex })
    }

    pub fn matches(&self, line: &str) -> Option<HeaderHit> {
        let caps = self.regex.captures(line)?;
        let paper = caps.name("paper").map(|m| Label::from_capture(m.as_str()));
        let question_type = caps.name("type").map(|m| Label::from_capture(m.as_str()));
        Some(HeaderHit {
            rule: self.label.clone(),
            paper,
            question_type,
        })
    }
}

/// 题目起始规则命中结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionHit {
    /// 题号；捕获缺失或不是正整数时为 `None`
    pub number: Option<u32>,
    /// 题号标记在行内结束的字节位置
    pub marker_end: usize,
}

/// 题目起始规则，可选命名捕获 `num`
#[derive(Debug, Clone)]
pub struct QuestionRule {
    pub label: String,
    regex: Regex,
}

impl QuestionRule {
    pub fn new(label: impl Into<String>, pattern: &str) -> AppResult<Self> {
        let label = label.into();
        let regex = Regex::new(pattern)
            .map_err(|e| AppError::invalid_pattern(label.clone(), pattern, e))?;
        Ok(Self { label, regex })
    }

    /// 只接受从行首开始的命中
    pub fn matches(&self, line: &str) -> Option<QuestionHit> {
        let caps = self.regex.captures(line)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 {
            return None;
        }
        Some(QuestionHit {
            number: caps.name("num").and_then(|m| parse_number(m.as_str())),
            marker_end: whole.end(),
        })
    }
}

/// 解析题号，全角数字按半角处理
fn parse_number(text: &str) -> Option<u32> {
    let normalized: String = text
        .trim()
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            _ => c,
        })
        .collect();
    normalized.parse::<u32>().ok().filter(|n| *n > 0)
}

/// 知识点标签及其关键词
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl TagRule {
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// 任一关键词作为子串出现即命中（区分大小写）
    pub fn matches(&self, content: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && content.contains(keyword.as_str()))
    }
}

/// 题型到难度的映射项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyRule {
    pub question_type: String,
    pub level: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_rule_requires_named_capture() {
        let err = HeaderRule::new("bad", r"^卷[一二]").unwrap_err();
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::MissingCapture { .. })
        ));
    }

    #[test]
    fn test_header_rule_captures_paper_and_type() {
        let rule = HeaderRule::new("both", r"^(?P<paper>卷[一二])\s*(?P<type>\S+题)$").unwrap();
        let hit = rule.matches("卷二 填空题").unwrap();
        assert_eq!(hit.paper, Some(Label::Known("卷二".to_string())));
        assert_eq!(hit.question_type, Some(Label::Known("填空题".to_string())));
    }

    #[test]
    fn test_question_rule_reports_marker_end() {
        let rule = QuestionRule::new("arabic", r"(?P<num>\d+)\.\s*").unwrap();
        let hit = rule.matches("12. 栈").unwrap();
        assert_eq!(hit.number, Some(12));
        assert_eq!(&"12. 栈"[hit.marker_end..], "栈");
        // 不在行首的命中不算题目起始
        assert_eq!(rule.matches("见第 3. 题"), None);
    }

    #[test]
    fn test_non_numeric_capture_has_no_number() {
        let rule = QuestionRule::new("cn", r"^(?P<num>[一二三])、").unwrap();
        let hit = rule.matches("二、简述").unwrap();
        assert_eq!(hit.number, None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("１２"), Some(12));
        assert_eq!(parse_number("0"), None);
        assert_eq!(parse_number("三"), None);
    }

    #[test]
    fn test_tag_rule_is_case_sensitive() {
        let rule = TagRule::new("Cache", ["Cache"]);
        assert!(rule.matches("Cache 命中率"));
        assert!(!rule.matches("cache 命中率"));
    }
}
