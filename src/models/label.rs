use serde::{Serialize, Serializer};
use std::fmt;

/// 试卷卷名或题型的标签
///
/// 没有任何规则命中时使用 `Unknown`，以便下游区分"识别为 X"与"未识别"。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Label {
    Known(String),
    #[default]
    Unknown,
}

impl Label {
    /// 由捕获文本创建标签，空白文本视为未识别
    pub fn from_capture(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            Label::Unknown
        } else {
            Label::Known(text.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Label::Known(s) => s,
            Label::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_capture_is_unknown() {
        assert_eq!(Label::from_capture("  "), Label::Unknown);
        assert_eq!(Label::from_capture(" 卷一 "), Label::Known("卷一".to_string()));
        assert_eq!(Label::Unknown.to_string(), "Unknown");
    }
}
