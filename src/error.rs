use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 规则目录错误
    #[error("规则目录错误: {0}")]
    Catalog(#[from] CatalogError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 不支持的页面文件格式
    #[error("不支持的页面文件格式: {path}")]
    UnsupportedFormat { path: String },
    /// 文件中没有任何非空页面
    #[error("文件中没有可用的页面文本: {path}")]
    NoPages { path: String },
}

/// 规则目录错误
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 正则表达式编译失败
    #[error("规则 '{label}' 的正则无法编译 ({pattern}): {source}")]
    InvalidPattern {
        label: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// 规则目录定义无法解析
    #[error("规则目录 '{name}' 解析失败: {source}")]
    ParseFailed {
        name: String,
        #[source]
        source: toml::de::Error,
    },
    /// 难度等级无法识别
    #[error("无法识别的难度等级: {value}")]
    UnknownDifficulty { value: String },
    /// 标题规则缺少命名捕获
    #[error("规则 '{label}' 缺少命名捕获 ({expected})")]
    MissingCapture { label: String, expected: String },
    /// 没有题目起始规则
    #[error("规则目录 '{name}' 缺少题目起始规则")]
    NoQuestionRules { name: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 长度范围无效
    #[error("题目长度范围无效: 最小值 {min} 大于最大值 {max}")]
    InvalidLengthBounds { min: usize, max: usize },
    /// 未指定输入文件
    #[error("未指定页面文本文件")]
    MissingInput,
    /// 学科ID无法识别
    #[error("无法识别的学科: {subject}")]
    UnknownSubject { subject: String },
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 创建输出目录失败
    #[error("无法创建输出目录 ({path}): {source}")]
    CreateDirFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入 CSV 失败
    #[error("写入CSV失败 ({path}): {source}")]
    CsvWriteFailed {
        path: String,
        #[source]
        source: csv::Error,
    },
    /// 刷新输出失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return AppError::File(FileError::NotFound { path: path.into() });
        }
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建正则编译错误
    pub fn invalid_pattern(
        label: impl Into<String>,
        pattern: impl Into<String>,
        source: regex::Error,
    ) -> Self {
        AppError::Catalog(CatalogError::InvalidPattern {
            label: label.into(),
            pattern: pattern.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
