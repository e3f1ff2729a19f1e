//! 试卷结构解析 - 业务能力层
//!
//! 两步：
//! 1. `identify_sections`：按页扫描文本，依据标题规则切分出各卷各题型
//! 2. `extract_questions`：在单个部分内依据题目起始规则切分出每道题
//!
//! 解析过程不会失败：无法识别的结构退化为兜底部分或零道题。

use crate::catalog::{HeaderHit, PatternCatalog, QuestionHit};
use crate::models::{Label, ParsedQuestion, Section};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// 题目内容长度范围（按字符计，闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        self.min <= len && len <= self.max
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self { min: 10, max: 800 }
    }
}

/// 被丢弃的题目计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropCounts {
    pub too_short: usize,
    pub too_long: usize,
    pub noise: usize,
}

impl DropCounts {
    pub fn total(&self) -> usize {
        self.too_short + self.too_long + self.noise
    }

    pub fn merge(&mut self, other: DropCounts) {
        self.too_short += other.too_short;
        self.too_long += other.too_long;
        self.noise += other.noise;
    }
}

/// 单个部分的题目提取结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub questions: Vec<ParsedQuestion>,
    pub dropped: DropCounts,
}

/// 正在收集内容的部分
struct OpenSection<'t> {
    paper_id: Label,
    question_type: Label,
    start_page: usize,
    preamble: bool,
    lines: Vec<&'t str>,
}

impl<'t> OpenSection<'t> {
    fn new(paper_id: Label, question_type: Label, start_page: usize) -> Self {
        Self {
            paper_id,
            question_type,
            start_page,
            preamble: false,
            lines: Vec::new(),
        }
    }

    /// 第一个标题之前的文字
    fn preamble() -> Self {
        Self {
            preamble: true,
            ..Self::new(Label::Unknown, Label::Unknown, 1)
        }
    }

    fn into_section(self) -> Section {
        Section {
            paper_id: self.paper_id,
            question_type: self.question_type,
            start_page: self.start_page,
            text: self.lines.join("\n"),
            preamble: self.preamble,
        }
    }
}

/// 正在收集内容的题目
struct OpenQuestion<'t> {
    number: u32,
    parts: Vec<&'t str>,
}

/// 试卷结构解析器
pub struct StructuralParser<'c> {
    catalog: &'c PatternCatalog,
    bounds: LengthBounds,
}

impl<'c> StructuralParser<'c> {
    pub fn new(catalog: &'c PatternCatalog, bounds: LengthBounds) -> Self {
        Self { catalog, bounds }
    }

    /// 识别试卷各部分（卷、题型）
    ///
    /// 第一个标题之前的文本归入一个未识别的前置部分；正文为空的部分不输出。
    /// 整份文本没有任何标题命中时，返回一个包含全部文本的兜底部分。
    pub fn identify_sections<S: AsRef<str>>(&self, pages: &[S]) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut current = OpenSection::preamble();
        let mut header_seen = false;

        for (page_idx, page) in pages.iter().enumerate() {
            for line in page.as_ref().lines() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let Some(hit) = self.match_header(line) else {
                    current.lines.push(line);
                    continue;
                };

                debug!("第{}页 标题命中 [{}]: {}", page_idx + 1, hit.rule, line);
                header_seen = true;

                let (paper_id, question_type) = match (hit.paper, hit.question_type) {
                    (Some(paper), Some(question_type)) => (paper, question_type),
                    // 新的卷重新开始题型
                    (Some(paper), None) => (paper, Label::Unknown),
                    (None, Some(question_type)) => (current.paper_id.clone(), question_type),
                    (None, None) => (current.paper_id.clone(), current.question_type.clone()),
                };

                let closed = std::mem::replace(
                    &mut current,
                    OpenSection::new(paper_id, question_type, page_idx + 1),
                );
                push_non_blank(&mut sections, closed.into_section());
            }
        }

        if !header_seen {
            debug!("未识别到任何标题，使用兜底部分");
            return vec![Section::implicit(1, current.lines.join("\n"))];
        }
        push_non_blank(&mut sections, current.into_section());

        log_sections(&sections);
        sections
    }

    /// 从单个部分中提取题目
    ///
    /// 题号取自规则的 `num` 捕获；捕获缺失或不是正整数时，使用本部分内
    /// 上一题题号加一。长度超出范围或只含选项/编号的内容被丢弃并计数。
    /// 第一个标题之前的前置文字（考试须知等）不产生题目。
    pub fn extract_questions(&self, section: &Section) -> Extraction {
        let mut extraction = Extraction::default();
        if section.preamble {
            debug!("{} 为前置文字，跳过题目提取", section);
            return extraction;
        }
        let mut open: Option<OpenQuestion<'_>> = None;
        let mut last_number = 0u32;

        for line in section.text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(hit) = self.match_question_start(line) {
                if let Some(finished) = open.take() {
                    self.finish_question(section, finished, &mut extraction);
                }
                let number = hit.number.unwrap_or(last_number.saturating_add(1));
                last_number = number;
                open = Some(OpenQuestion {
                    number,
                    parts: vec![&line[hit.marker_end..]],
                });
            } else if let Some(question) = open.as_mut() {
                question.parts.push(line);
            }
        }

        if let Some(finished) = open.take() {
            self.finish_question(section, finished, &mut extraction);
        }

        debug!(
            "{} 提取 {} 道题目, 丢弃 {} 段",
            section,
            extraction.questions.len(),
            extraction.dropped.total()
        );
        extraction
    }

    fn finish_question(&self, section: &Section, question: OpenQuestion<'_>, extraction: &mut Extraction) {
        let content = normalize_whitespace(&question.parts.join(" "));
        let len = content.chars().count();

        if len < self.bounds.min {
            extraction.dropped.too_short += 1;
            return;
        }
        if len > self.bounds.max {
            extraction.dropped.too_long += 1;
            return;
        }
        if self.catalog.noise.as_ref().is_some_and(|noise| noise.is_match(&content)) {
            extraction.dropped.noise += 1;
            return;
        }

        extraction.questions.push(ParsedQuestion {
            paper_id: section.paper_id.clone(),
            question_type: section.question_type.clone(),
            question_number: question.number,
            content,
        });
    }

    /// 按优先级尝试标题规则，第一个命中者生效
    fn match_header(&self, line: &str) -> Option<HeaderHit> {
        self.catalog
            .section_headers
            .iter()
            .find_map(|rule| rule.matches(line))
    }

    /// 按优先级尝试题目起始规则，第一个命中者生效
    fn match_question_start(&self, line: &str) -> Option<QuestionHit> {
        self.catalog
            .question_starts
            .iter()
            .find_map(|rule| rule.matches(line))
    }
}

fn push_non_blank(sections: &mut Vec<Section>, section: Section) {
    if !section.is_blank() {
        sections.push(section);
    }
}

/// 连续空白折叠为一个空格并去掉首尾空白
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn log_sections(sections: &[Section]) {
    let mut per_paper: BTreeMap<&str, usize> = BTreeMap::new();
    for section in sections {
        *per_paper.entry(section.paper_id.as_str()).or_default() += 1;
    }
    for (paper, count) in per_paper {
        info!("   {}: {} 个题型部分", paper, count);
    }
}
