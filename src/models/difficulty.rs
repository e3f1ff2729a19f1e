use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Simple,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Simple, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Simple => "Simple",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl FromStr for Difficulty {
    type Err = String;

    /// 支持英文名和中文名（简单/中等/困难）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Simple" | "simple" | "Easy" | "easy" | "简单" => Ok(Difficulty::Simple),
            "Medium" | "medium" | "中等" => Ok(Difficulty::Medium),
            "Hard" | "hard" | "困难" => Ok(Difficulty::Hard),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("简单".parse::<Difficulty>(), Ok(Difficulty::Simple));
        assert!("extreme".parse::<Difficulty>().is_err());
    }
}
