use crate::models::label::Label;

/// 试卷中的一个部分（某卷的某个题型）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub paper_id: Label,
    pub question_type: Label,
    /// 该部分开始的页码（从1开始）
    pub start_page: usize,
    /// 正文文本，不含标题行
    pub text: String,
    /// 第一个标题之前的前置文字
    pub preamble: bool,
}

impl Section {
    /// 没有任何标题命中时的兜底部分
    pub fn implicit(start_page: usize, text: String) -> Self {
        Self {
            paper_id: Label::Unknown,
            question_type: Label::Unknown,
            start_page,
            text,
            preamble: false,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} / {} @第{}页]", self.paper_id, self.question_type, self.start_page)
    }
}
