use crate::error::FileError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 抽取器输出的页面文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument {
    /// 原始文档名称（用于学科检测）
    pub name: String,
    /// 按页顺序排列的非空文本
    pub pages: Vec<String>,
}

impl PageDocument {
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }

    /// 所有页面拼接后的文本
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }
}

/// TOML 页面转储格式
#[derive(Debug, Deserialize)]
struct PageDump {
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    page_num: Option<usize>,
    text: String,
}

/// 从文件加载页面文本
///
/// - `.toml`：`[[pages]]` 数组，每项包含 `text`（可选 `page_num`）
/// - `.txt`：以换页符 `\x0C` 分隔页面
pub async fn load_pages(path: &Path) -> Result<PageDocument> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取页面文件: {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase);

    let document = match extension.as_deref() {
        Some("toml") => parse_toml_pages(path, &content)?,
        Some("txt") | Some("text") => parse_text_pages(path, &content),
        _ => {
            return Err(FileError::UnsupportedFormat {
                path: path.display().to_string(),
            }
            .into())
        }
    };

    if document.pages.is_empty() {
        return Err(FileError::NoPages {
            path: path.display().to_string(),
        }
        .into());
    }

    tracing::info!("成功加载 {} 页文本", document.pages.len());
    Ok(document)
}

fn parse_toml_pages(path: &Path, content: &str) -> Result<PageDocument> {
    let dump: PageDump = toml::from_str(content).map_err(|source| FileError::TomlParseFailed {
        path: path.display().to_string(),
        source,
    })?;

    let mut entries = dump.pages;
    // 带页码的条目按页码排序，未标页码的保持原顺序
    entries.sort_by_key(|entry| entry.page_num.unwrap_or(usize::MAX));

    let pages = entries
        .into_iter()
        .map(|entry| entry.text)
        .filter(|text| !text.trim().is_empty())
        .collect();

    let name = dump.source.unwrap_or_else(|| file_name(path));
    Ok(PageDocument::new(name, pages))
}

fn parse_text_pages(path: &Path, content: &str) -> PageDocument {
    let pages = content
        .split('\x0C')
        .filter(|page| !page.trim().is_empty())
        .map(str::to_string)
        .collect();
    PageDocument::new(file_name(path), pages)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("exam_etl_loader_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_text_pages_split_on_form_feed() {
        let path = temp_file("数据结构.txt", "卷一\n一、选择题\x0C\n\x0C1. 题目");
        let document = load_pages(&path).await.unwrap();
        assert_eq!(document.name, "数据结构.txt");
        assert_eq!(document.pages.len(), 2);
        assert_eq!(document.pages[1], "1. 题目");
    }

    #[tokio::test]
    async fn test_load_toml_pages_sorted_by_page_num() {
        let path = temp_file(
            "dump.toml",
            r#"
source = "转 Word_数据结构卷一.pdf"

[[pages]]
page_num = 2
text = "第二页"

[[pages]]
page_num = 1
text = "第一页"

[[pages]]
page_num = 3
text = "   "
"#,
        );
        let document = load_pages(&path).await.unwrap();
        assert_eq!(document.name, "转 Word_数据结构卷一.pdf");
        assert_eq!(document.pages, vec!["第一页", "第二页"]);
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let path = temp_file("pages.pdf", "binary");
        let err = load_pages(&path).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FileError>(),
            Some(FileError::UnsupportedFormat { .. })
        ));
    }

    #[tokio::test]
    async fn test_blank_document_has_no_pages() {
        let path = temp_file("blank.txt", " \n\x0C\n");
        let err = load_pages(&path).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FileError>(),
            Some(FileError::NoPages { .. })
        ));
    }
}
