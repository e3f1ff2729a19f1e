//! 学科检测 - 业务能力层
//!
//! 先看文件名，再统计正文关键词，都无法判断时使用通用学科。

use crate::models::Subject;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// 文件名规则，按学科注册顺序排列
static FILENAME_RULES: LazyLock<Vec<(Subject, Regex)>> = LazyLock::new(|| {
    let rules: [(Subject, &[&str]); 5] = [
        (
            Subject::DataStructure,
            &["数据结构", r"(?i)data[\s_-]*structure", r"(?i)(?:^|[^a-z])ds(?:[^a-z]|$)"],
        ),
        (
            Subject::CompOrg,
            &[
                "计算机组成",
                "组成原理",
                r"(?i)computer[\s_-]*organization",
                r"(?i)comp[\s_-]*org",
            ],
        ),
        (
            Subject::Os,
            &["操作系统", r"(?i)operating[\s_-]*system", r"(?i)(?:^|[^a-z])os(?:[^a-z]|$)"],
        ),
        (Subject::Network, &["计算机网络", "网络", r"(?i)network"]),
        (Subject::Database, &["数据库", r"(?i)database"]),
    ];

    rules
        .iter()
        .flat_map(|(subject, patterns)| {
            patterns.iter().map(move |p| {
                (
                    *subject,
                    Regex::new(p).expect("built-in filename pattern must compile"),
                )
            })
        })
        .collect()
});

/// 正文关键词（区分大小写）
const CONTENT_KEYWORDS: [(Subject, &[&str]); 5] = [
    (Subject::DataStructure, &["数据结构", "Data Structure"]),
    (
        Subject::CompOrg,
        &["计算机组成", "组成原理", "Computer Organization", "计算机组织"],
    ),
    (Subject::Os, &["操作系统", "Operating System"]),
    (Subject::Network, &["计算机网络", "网络", "Computer Network", "Network"]),
    (Subject::Database, &["数据库", "Database"]),
];

/// 从文件名检测学科
pub fn detect_from_filename(path: &Path) -> Option<Subject> {
    let name = path.file_name()?.to_string_lossy();
    FILENAME_RULES
        .iter()
        .find(|(_, regex)| regex.is_match(&name))
        .map(|(subject, _)| *subject)
}

/// 从正文检测学科（关键词出现次数最多者，同分时取注册顺序靠前者）
pub fn detect_from_content(content: &str) -> Option<Subject> {
    let mut best: Option<(Subject, usize)> = None;
    for (subject, keywords) in CONTENT_KEYWORDS {
        let score: usize = keywords.iter().map(|k| content.matches(k).count()).sum();
        if score > 0 && best.map_or(true, |(_, top)| score > top) {
            best = Some((subject, score));
        }
    }
    best.map(|(subject, _)| subject)
}

/// 综合检测学科：文件名优先，其次正文，默认通用
pub fn detect(path: &Path, content: &str) -> Subject {
    if let Some(subject) = detect_from_filename(path) {
        debug!("根据文件名识别学科: {}", subject);
        return subject;
    }
    if let Some(subject) = detect_from_content(content) {
        debug!("根据正文关键词识别学科: {}", subject);
        return subject;
    }
    Subject::Default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_chinese_filename() {
        let path = Path::new("data/input/转 Word_数据结构卷一.pdf");
        assert_eq!(detect_from_filename(path), Some(Subject::DataStructure));
    }

    #[test]
    fn test_detect_from_english_filename_ignores_case() {
        assert_eq!(
            detect_from_filename(Path::new("Computer_Organization_2023.toml")),
            Some(Subject::CompOrg)
        );
        assert_eq!(detect_from_filename(Path::new("final-OS exam.txt")), Some(Subject::Os));
        assert_eq!(detect_from_filename(Path::new("cosine.txt")), None);
    }

    #[test]
    fn test_short_abbreviation_split_by_separators() {
        assert_eq!(detect_from_filename(Path::new("ds_2023.pdf")), Some(Subject::DataStructure));
        assert_eq!(detect_from_filename(Path::new("2023-DS.txt")), Some(Subject::DataStructure));
        assert_eq!(detect_from_filename(Path::new("exam.os.toml")), Some(Subject::Os));
        assert_eq!(detect_from_filename(Path::new("words.txt")), None);
    }

    #[test]
    fn test_filename_priority_follows_registry_order() {
        // 同时包含"数据结构"和"网络"时数据结构优先
        let path = Path::new("数据结构与网络.txt");
        assert_eq!(detect_from_filename(path), Some(Subject::DataStructure));
    }

    #[test]
    fn test_detect_from_content_highest_score() {
        let content = "操作系统 进程 ... 计算机网络 网络 协议";
        assert_eq!(detect_from_content(content), Some(Subject::Network));
        assert_eq!(detect_from_content("没有关键词"), None);
    }

    #[test]
    fn test_content_tie_keeps_registry_order() {
        assert_eq!(detect_from_content("数据库 操作系统"), Some(Subject::Os));
    }

    #[test]
    fn test_detect_defaults() {
        assert_eq!(detect(Path::new("paper.txt"), "随便什么内容"), Subject::Default);
        assert_eq!(detect(Path::new("paper.txt"), "数据库系统概论"), Subject::Database);
    }
}
