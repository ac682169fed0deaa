//! 卸载规则配置
//!
//! 额外参数表和 Appx 别名表在进程启动时加载一次，之后以只读引用传给各组件

pub mod models;

use std::path::{Path, PathBuf};

use crate::modules::common::error::UninstallerError;
use crate::modules::common::utils;
pub use models::{ExtraParamRule, PackageAliasRule, Rules};

/// 编译期预设的目标程序名
const PREDEFINED_TARGET: Option<&str> = option_env!("RUST_YU_PREDEFINED_TARGET");

/// 默认规则文件位置: <config dir>/rust-yu-fallback/rules.json
pub fn default_rules_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rust-yu-fallback").join("rules.json"))
}

/// 加载规则
///
/// 显式指定的文件读取失败直接报错；默认位置不存在时使用内置规则
pub fn load_rules(explicit: Option<&Path>) -> Result<Rules, UninstallerError> {
    let mut rules = match explicit {
        Some(path) => read_rules_file(path)?,
        None => match default_rules_path().filter(|p| p.is_file()) {
            Some(path) => read_rules_file(&path)?,
            None => {
                tracing::debug!("未找到规则文件，使用内置规则");
                Rules::default()
            }
        },
    };

    if rules.predefined_target.is_none() {
        rules.predefined_target = PREDEFINED_TARGET.map(str::to_string);
    }
    rules.predefined_target = utils::non_empty(rules.predefined_target.take());

    Ok(rules)
}

/// 从 JSON 文件读取规则
pub fn read_rules_file(path: &Path) -> Result<Rules, UninstallerError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        UninstallerError::Config(format!("无法读取规则文件 {}: {}", path.display(), e))
    })?;
    let rules: Rules = serde_json::from_str(&content)
        .map_err(|e| UninstallerError::Serde(format!("{}: {}", path.display(), e)))?;

    if rules.timeout_secs == 0 {
        return Err(UninstallerError::Config("timeout_secs 必须大于 0".to_string()));
    }

    tracing::debug!(
        "已加载规则文件 {}: {} 条额外参数, {} 条包别名",
        path.display(),
        rules.extra_params.len(),
        rules.package_aliases.len()
    );
    Ok(rules)
}

impl Rules {
    /// 第一条 pattern 包含于显示名中的规则生效
    pub fn extra_params_for(&self, display_name: &str) -> Option<&str> {
        self.extra_params
            .iter()
            .find(|rule| utils::contains_ignore_case(display_name, &rule.pattern))
            .map(|rule| rule.params.as_str())
    }

    /// 按小写目标精确查找 Appx 搜索词，未命中时返回原目标
    pub fn package_search_term<'a>(&'a self, target: &'a str) -> &'a str {
        let key = target.trim().to_lowercase();
        self.package_aliases
            .iter()
            .find(|rule| rule.keyword.to_lowercase() == key)
            .map(|rule| rule.search_term.as_str())
            .unwrap_or(target)
    }
}
