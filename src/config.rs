use crate::error::{AppResult, ConfigError, FileError};
use std::path::{Path, PathBuf};

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 页面文本文件（抽取器输出，.toml 或 .txt）
    pub pages_path: Option<PathBuf>,
    /// 输出CSV路径
    pub output_csv: PathBuf,
    /// 学科ID，`auto` 表示自动检测
    pub subject: String,
    /// 自定义规则目录所在文件夹
    pub catalog_dir: Option<PathBuf>,
    /// 题目内容最小长度（字符数）
    pub min_content_length: usize,
    /// 题目内容最大长度（字符数）
    pub max_content_length: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_path: None,
            output_csv: PathBuf::from("data/output/exam_analysis.csv"),
            subject: "auto".to_string(),
            catalog_dir: None,
            min_content_length: 10,
            max_content_length: 800,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            pages_path: std::env::var("PAGES_PATH")
                .ok()
                .map(PathBuf::from)
                .or(default.pages_path),
            output_csv: std::env::var("OUTPUT_CSV")
                .map(PathBuf::from)
                .unwrap_or(default.output_csv),
            subject: std::env::var("SUBJECT").unwrap_or(default.subject),
            catalog_dir: std::env::var("CATALOG_DIR")
                .ok()
                .map(PathBuf::from)
                .or(default.catalog_dir),
            min_content_length: std::env::var("MIN_CONTENT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.min_content_length),
            max_content_length: std::env::var("MAX_CONTENT_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_content_length),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
        }
    }

    /// 自动检测学科时返回 `true`
    pub fn auto_detect(&self) -> bool {
        self.subject.eq_ignore_ascii_case("auto")
    }

    /// 校验配置有效性
    pub fn validate(&self) -> AppResult<&Path> {
        if self.min_content_length > self.max_content_length {
            return Err(ConfigError::InvalidLengthBounds {
                min: self.min_content_length,
                max: self.max_content_length,
            }
            .into());
        }

        let pages_path = self.pages_path.as_deref().ok_or(ConfigError::MissingInput)?;
        if !pages_path.exists() {
            return Err(FileError::NotFound {
                path: pages_path.display().to_string(),
            }
            .into());
        }

        Ok(pages_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_default_bounds() {
        let config = Config::default();
        assert_eq!(config.min_content_length, 10);
        assert_eq!(config.max_content_length, 800);
        assert!(config.auto_detect());
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let config = Config {
            min_content_length: 50,
            max_content_length: 5,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::Config(ConfigError::InvalidLengthBounds { min: 50, max: 5 }))
        ));
    }

    #[test]
    fn test_validate_requires_input() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(AppError::Config(ConfigError::MissingInput))
        ));
    }

    #[test]
    fn test_validate_reports_missing_file() {
        let config = Config {
            pages_path: Some(PathBuf::from("definitely/not/here.txt")),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AppError::File(FileError::NotFound { .. }))
        ));
    }
}
