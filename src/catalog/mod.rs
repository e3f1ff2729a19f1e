//! 规则目录（Pattern Catalog）
//!
//! 保存解析器和打标器使用的全部规则：
//! - 卷名/题型标题规则（有序，先命中者优先）
//! - 题目起始规则（有序，先命中者优先）
//! - 知识点标签关键词表（有序，仅影响展示顺序）
//! - 题型到难度的映射表
//!
//! 规则目录由 TOML 定义，内置 `default`、`data_structure`、`computer_organization` 三份。

pub mod rules;

use crate::error::{AppError, AppResult, CatalogError};
use crate::models::Difficulty;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub use rules::{DifficultyRule, HeaderHit, HeaderRule, QuestionHit, QuestionRule, TagRule};

const BUILTIN_DEFAULT: &str = include_str!("../../catalogs/default.toml");
const BUILTIN_DATA_STRUCTURE: &str = include_str!("../../catalogs/data_structure.toml");
const BUILTIN_COMPUTER_ORGANIZATION: &str =
    include_str!("../../catalogs/computer_organization.toml");

/// TOML 中的规则目录定义
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDef {
    #[serde(default = "default_subject_id")]
    pub subject_id: String,
    #[serde(default = "default_subject_name")]
    pub subject_name: String,
    #[serde(default)]
    pub default_difficulty: Option<String>,
    #[serde(default)]
    pub untagged_label: Option<String>,
    #[serde(default)]
    pub noise_pattern: Option<String>,
    #[serde(default)]
    pub section_headers: Vec<PatternDef>,
    #[serde(default)]
    pub question_starts: Vec<PatternDef>,
    #[serde(default)]
    pub tags: Vec<TagDef>,
    #[serde(default)]
    pub difficulty: Vec<DifficultyDef>,
}

fn default_subject_id() -> String {
    "default".to_string()
}

fn default_subject_name() -> String {
    "通用".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternDef {
    pub label: String,
    pub pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagDef {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyDef {
    pub question_type: String,
    pub level: String,
}

/// 编译后的规则目录
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    pub subject_id: String,
    pub subject_name: String,
    pub section_headers: Vec<HeaderRule>,
    pub question_starts: Vec<QuestionRule>,
    pub tags: Vec<TagRule>,
    pub difficulty: Vec<DifficultyRule>,
    pub default_difficulty: Difficulty,
    pub noise: Option<Regex>,
    pub untagged_label: String,
}

impl PatternCatalog {
    /// 编译规则目录定义
    pub fn compile(def: CatalogDef) -> AppResult<Self> {
        if def.question_starts.is_empty() {
            return Err(CatalogError::NoQuestionRules {
                name: def.subject_id,
            }
            .into());
        }

        let section_headers = def
            .section_headers
            .iter()
            .map(|p| HeaderRule::new(p.label.as_str(), &p.pattern))
            .collect::<AppResult<Vec<_>>>()?;

        let question_starts = def
            .question_starts
            .iter()
            .map(|p| QuestionRule::new(p.label.as_str(), &p.pattern))
            .collect::<AppResult<Vec<_>>>()?;

        let tags = def
            .tags
            .into_iter()
            .map(|t| TagRule::new(t.name, t.keywords))
            .collect::<Vec<_>>();

        let difficulty = def
            .difficulty
            .into_iter()
            .map(|d| {
                Ok(DifficultyRule {
                    level: parse_level(&d.level)?,
                    question_type: d.question_type,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let default_difficulty = match def.default_difficulty.as_deref() {
            Some(level) => parse_level(level)?,
            None => Difficulty::default(),
        };

        let noise = def
            .noise_pattern
            .as_deref()
            .map(|p| Regex::new(p).map_err(|e| AppError::invalid_pattern("noise_pattern", p, e)))
            .transpose()?;

        debug!(
            "规则目录 {} 编译完成: 标题规则 {} 条, 题目规则 {} 条, 标签 {} 个",
            def.subject_id,
            section_headers.len(),
            question_starts.len(),
            tags.len()
        );

        Ok(Self {
            subject_id: def.subject_id,
            subject_name: def.subject_name,
            section_headers,
            question_starts,
            tags,
            difficulty,
            default_difficulty,
            noise,
            untagged_label: def.untagged_label.unwrap_or_else(|| "Other".to_string()),
        })
    }

    /// 从 TOML 文本解析并编译
    pub fn from_toml(name: &str, content: &str) -> AppResult<Self> {
        let def: CatalogDef = toml::from_str(content).map_err(|source| CatalogError::ParseFailed {
            name: name.to_string(),
            source,
        })?;
        Self::compile(def)
    }

    /// 加载内置规则目录，未知名称使用 default
    pub fn builtin(name: &str) -> AppResult<Self> {
        let content = match name {
            "data_structure" => BUILTIN_DATA_STRUCTURE,
            "computer_organization" => BUILTIN_COMPUTER_ORGANIZATION,
            "default" => BUILTIN_DEFAULT,
            other => {
                warn!("没有内置规则目录 {}，使用 default", other);
                BUILTIN_DEFAULT
            }
        };
        Self::from_toml(name, content)
    }

    /// 优先从目录加载 `<name>.toml`，文件不存在时使用内置规则目录
    pub async fn load(name: &str, catalog_dir: Option<&Path>) -> AppResult<Self> {
        if let Some(dir) = catalog_dir {
            let path = dir.join(format!("{}.toml", name));
            match tokio::fs::read_to_string(&path).await {
                Ok(content) => {
                    debug!("使用自定义规则目录: {}", path.display());
                    return Self::from_toml(name, &content);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("自定义规则目录不存在: {}，使用内置规则", path.display());
                }
                Err(e) => return Err(AppError::file_read_failed(path.display().to_string(), e)),
            }
        }
        Self::builtin(name)
    }

    /// 替换标签表（测试或调用方注入自定义关键词）
    pub fn with_tags(mut self, tags: Vec<TagRule>) -> Self {
        self.tags = tags;
        self
    }

    /// 替换难度映射表
    pub fn with_difficulty(mut self, difficulty: Vec<DifficultyRule>, default: Difficulty) -> Self {
        self.difficulty = difficulty;
        self.default_difficulty = default;
        self
    }
}

fn parse_level(value: &str) -> AppResult<Difficulty> {
    value
        .parse::<Difficulty>()
        .map_err(|value| AppError::from(CatalogError::UnknownDifficulty { value }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogs_compile() {
        for name in ["default", "data_structure", "computer_organization"] {
            let catalog = PatternCatalog::builtin(name).unwrap();
            assert_eq!(catalog.section_headers.len(), 4);
            assert_eq!(catalog.question_starts.len(), 3);
            assert!(catalog.noise.is_some());
            assert_eq!(catalog.untagged_label, "Other");
        }
    }

    #[test]
    fn test_unknown_builtin_falls_back_to_default() {
        let catalog = PatternCatalog::builtin("chemistry").unwrap();
        assert_eq!(catalog.subject_id, "default");
    }

    #[test]
    fn test_tag_order_follows_declaration() {
        let catalog = PatternCatalog::builtin("data_structure").unwrap();
        let names: Vec<&str> = catalog.tags.iter().map(|t| t.name.as_str()).collect();
        let tree = names.iter().position(|n| *n == "Tree").unwrap();
        let graph = names.iter().position(|n| *n == "Graph").unwrap();
        assert!(tree < graph);
    }

    #[test]
    fn test_with_difficulty_replaces_table_and_default() {
        let catalog = PatternCatalog::builtin("default").unwrap().with_difficulty(
            vec![DifficultyRule {
                question_type: "论述".to_string(),
                level: Difficulty::Hard,
            }],
            Difficulty::Simple,
        );
        assert_eq!(catalog.difficulty.len(), 1);
        assert_eq!(catalog.default_difficulty, Difficulty::Simple);
    }

    #[test]
    fn test_invalid_pattern_is_reported_at_compile_time() {
        let toml = r#"
[[question_starts]]
label = "broken"
pattern = '(\d+'
"#;
        let err = PatternCatalog::from_toml("broken", toml).unwrap_err();
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::InvalidPattern { ref label, .. }) if label == "broken"
        ));
    }

    #[test]
    fn test_catalog_without_question_rules_is_rejected() {
        let err = PatternCatalog::from_toml("empty", "subject_id = \"empty\"").unwrap_err();
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::NoQuestionRules { .. })
        ));
    }

    #[test]
    fn test_unknown_difficulty_level() {
        let toml = r#"
[[question_starts]]
label = "arabic"
pattern = '^(?P<num>\d+)\.'

[[difficulty]]
question_type = "选择"
level = "Trivial"
"#;
        let err = PatternCatalog::from_toml("bad_level", toml).unwrap_err();
        assert!(matches!(
            err,
            AppError::Catalog(CatalogError::UnknownDifficulty { .. })
        ));
    }

    #[tokio::test]
    async fn test_load_prefers_catalog_dir() {
        let dir = std::env::temp_dir().join(format!("exam_etl_catalog_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("custom.toml"),
            r#"
subject_id = "custom"
subject_name = "自定义"

[[question_starts]]
label = "arabic"
pattern = '^(?P<num>\d+)\.'
"#,
        )
        .unwrap();

        let custom = PatternCatalog::load("custom", Some(dir.as_path())).await.unwrap();
        assert_eq!(custom.subject_name, "自定义");

        let fallback = PatternCatalog::load("data_structure", Some(dir.as_path())).await.unwrap();
        assert_eq!(fallback.subject_id, "data_structure");
    }
}
