use serde::{Deserialize, Serialize};

use crate::modules::common::utils;

/// 注册表中的一条卸载记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareRecord {
    pub display_name: String,
    pub uninstall_command: Option<String>,
    pub quiet_uninstall_command: Option<String>,
    /// 如 HKLM\SOFTWARE\...\Uninstall\{GUID}
    pub registry_key_id: String,
}

impl SoftwareRecord {
    pub fn new(display_name: impl Into<String>, registry_key_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            uninstall_command: None,
            quiet_uninstall_command: None,
            registry_key_id: registry_key_id.into(),
        }
    }

    pub fn with_uninstall(mut self, command: impl Into<String>) -> Self {
        self.uninstall_command = Some(command.into());
        self
    }

    pub fn with_quiet_uninstall(mut self, command: impl Into<String>) -> Self {
        self.quiet_uninstall_command = Some(command.into());
        self
    }

    /// 优先使用 QuietUninstallString，否则 UninstallString
    pub fn preferred_command(&self) -> Option<&str> {
        [&self.quiet_uninstall_command, &self.uninstall_command]
            .into_iter()
            .flatten()
            .map(|c| c.trim())
            .find(|c| !c.is_empty())
    }

    pub fn matches(&self, target: &str) -> bool {
        utils::contains_ignore_case(&self.display_name, target)
    }
}

/// 扫描结果，未找到不是错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Found(SoftwareRecord),
    NotFound,
}
