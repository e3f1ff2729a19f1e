use phf::phf_map;

/// 学科枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Subject {
    /// 数据结构
    DataStructure,
    /// 计算机组成原理
    CompOrg,
    /// 操作系统
    Os,
    /// 计算机网络
    Network,
    /// 数据库
    Database,
    /// 通用
    Default,
}

/// 学科ID及别名
static SUBJECT_IDS: phf::Map<&'static str, Subject> = phf_map! {
    "data_structure" => Subject::DataStructure,
    "ds" => Subject::DataStructure,
    "comp_org" => Subject::CompOrg,
    "computer_organization" => Subject::CompOrg,
    "os" => Subject::Os,
    "network" => Subject::Network,
    "database" => Subject::Database,
    "db" => Subject::Database,
    "default" => Subject::Default,
};

impl Subject {
    /// 注册顺序，检测时按此顺序决定优先级
    pub const ALL: [Subject; 6] = [
        Subject::DataStructure,
        Subject::CompOrg,
        Subject::Os,
        Subject::Network,
        Subject::Database,
        Subject::Default,
    ];

    /// 获取学科ID
    pub fn id(self) -> &'static str {
        match self {
            Subject::DataStructure => "data_structure",
            Subject::CompOrg => "comp_org",
            Subject::Os => "os",
            Subject::Network => "network",
            Subject::Database => "database",
            Subject::Default => "default",
        }
    }

    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            Subject::DataStructure => "数据结构",
            Subject::CompOrg => "计算机组成原理",
            Subject::Os => "操作系统",
            Subject::Network => "计算机网络",
            Subject::Database => "数据库",
            Subject::Default => "通用",
        }
    }

    /// 对应的规则目录名（没有专门目录的学科使用 default）
    pub fn catalog_name(self) -> &'static str {
        match self {
            Subject::DataStructure => "data_structure",
            Subject::CompOrg => "computer_organization",
            Subject::Os | Subject::Network | Subject::Database | Subject::Default => "default",
        }
    }

    /// 从ID或别名解析学科（忽略大小写）
    pub fn from_id(id: &str) -> Option<Self> {
        SUBJECT_IDS.get(id.trim().to_lowercase().as_str()).copied()
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
