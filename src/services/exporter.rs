//! CSV导出 - 业务能力层
//!
//! 列顺序固定为 `Paper_ID, Question_Type, Question_Number, Content, Tag, Difficulty`。

use crate::error::{AppResult, ExportError};
use crate::models::Question;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// UTF-8 BOM，便于表格软件识别编码
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Paper_ID")]
    paper_id: &'a str,
    #[serde(rename = "Question_Type")]
    question_type: &'a str,
    #[serde(rename = "Question_Number")]
    question_number: u32,
    #[serde(rename = "Content")]
    content: &'a str,
    #[serde(rename = "Tag")]
    tag: String,
    #[serde(rename = "Difficulty")]
    difficulty: &'static str,
}

impl<'a> CsvRow<'a> {
    fn new(question: &'a Question, untagged_label: &str) -> Self {
        Self {
            paper_id: question.paper_id.as_str(),
            question_type: question.question_type.as_str(),
            question_number: question.question_number,
            content: &question.content,
            tag: question.tags.render(untagged_label),
            difficulty: question.difficulty.as_str(),
        }
    }
}

/// CSV导出器
pub struct CsvExporter {
    output_path: PathBuf,
}

impl CsvExporter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 保存为CSV，返回写入的行数
    pub fn save(&self, questions: &[Question], untagged_label: &str) -> AppResult<usize> {
        let path = self.output_path.display().to_string();

        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ExportError::CreateDirFailed {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = File::create(&self.output_path).map_err(|source| ExportError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        file.write_all(UTF8_BOM).map_err(|source| ExportError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        let rows = write_csv(file, questions, untagged_label).map_err(|source| {
            ExportError::CsvWriteFailed {
                path: path.clone(),
                source,
            }
        })?;

        info!("   ✅ 已保存到 {}", path);
        Ok(rows)
    }
}

/// 将题目写入任意输出
pub fn write_csv<W: Write>(writer: W, questions: &[Question], untagged_label: &str) -> Result<usize, csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for question in questions {
        csv_writer.serialize(CsvRow::new(question, untagged_label))?;
    }
    csv_writer.flush()?;
    Ok(questions.len())
}
