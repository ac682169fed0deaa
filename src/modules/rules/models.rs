use serde::{Deserialize, Serialize};

/// 默认单步超时 (秒)
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// 按显示名追加卸载参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraParamRule {
    /// 小写子串，匹配 DisplayName
    pub pattern: String,
    pub params: String,
}

/// 目标关键字到 Appx 包搜索词的映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageAliasRule {
    pub keyword: String,
    pub search_term: String,
}

/// 启动时加载一次的规则表，之后只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// 设置后忽略命令行参数
    pub predefined_target: Option<String>,
    /// 顺序有意义，第一条匹配生效
    pub extra_params: Vec<ExtraParamRule>,
    pub package_aliases: Vec<PackageAliasRule>,
    pub timeout_secs: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            predefined_target: None,
            extra_params: vec![
                ExtraParamRule::new("firefox", "-ms"),
                ExtraParamRule::new("mozilla ftp", "-y"),
                ExtraParamRule::new("putty", "/quiet"),
            ],
            package_aliases: vec![PackageAliasRule::new(
                "paint",
                "Microsoft.Windows.MSPaint",
            )],
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ExtraParamRule {
    pub fn new(pattern: &str, params: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            params: params.to_string(),
        }
    }
}

impl PackageAliasRule {
    pub fn new(keyword: &str, search_term: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            search_term: search_term.to_string(),
        }
    }
}
