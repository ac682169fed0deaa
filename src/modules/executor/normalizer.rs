use std::sync::LazyLock;

use regex::Regex;

use crate::modules::common::utils;
use crate::modules::rules::Rules;

/// 规范化后的卸载命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCommand {
    pub command: String,
    pub extra_params: Option<String>,
}

/// msiexec 的 /I (安装/修复) 开关，后面紧跟产品码、空白或结尾
static INSTALL_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/I(\{|\s|$)").expect("install flag regex is valid"));

/// 把 /I 改写为 /X
///
/// 注册表里的 UninstallString 经常写成 /I，执行会弹出修复界面
pub fn fix_msiexec_mode(command: &str) -> String {
    if !utils::is_msiexec_command(command) {
        return command.to_string();
    }
    INSTALL_FLAG.replace_all(command, "/X$1").into_owned()
}

/// 规范化命令，并按显示名查找额外参数
pub fn normalize(command: &str, display_name: &str, rules: &Rules) -> NormalizedCommand {
    NormalizedCommand {
        command: fix_msiexec_mode(command.trim()),
        extra_params: rules.extra_params_for(display_name).map(str::to_string),
    }
}
