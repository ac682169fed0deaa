use serde::{Deserialize, Serialize};

/// 卸载策略，按优先级排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UninstallStrategy {
    RegistryCommand,
    ManagementInterface,
    PackageManager,
    FeatureDisable,
}

impl UninstallStrategy {
    pub const ORDER: [UninstallStrategy; 4] = [
        Self::RegistryCommand,
        Self::ManagementInterface,
        Self::PackageManager,
        Self::FeatureDisable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::RegistryCommand => "注册表卸载命令",
            Self::ManagementInterface => "WMI",
            Self::PackageManager => "Appx 包",
            Self::FeatureDisable => "DISM 功能",
        }
    }
}

/// 成功的含义
///
/// WMI 和 Appx 只能确认请求被接受，无法确认程序确实已被移除
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confirmation {
    Completed,
    Requested,
}

/// 单个策略的执行结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum StrategyOutcome {
    Succeeded(Confirmation),
    /// 命令执行失败，附带诊断信息
    Failed(String),
    /// 没有可操作的对象 (如未找到匹配的包或功能)
    NotApplicable(String),
}

/// 一次策略尝试
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub strategy: UninstallStrategy,
    /// 策略作用的对象: 命令、显示名、搜索词或关键字
    pub subject: String,
    pub outcome: StrategyOutcome,
}
