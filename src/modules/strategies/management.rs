use super::models::{Confirmation, StrategyOutcome};
use super::registry_command::describe_failure;
use crate::modules::common::logging::{status, status_warn};
use crate::modules::common::utils;
use crate::modules::executor::{self, CommandRunner};

/// wmic 在 where 条件没有命中时仍返回 0，只在输出里提示
const NO_INSTANCE_MARKER: &str = "no instance";

pub fn build_command(display_name: &str) -> String {
    format!(
        r#"wmic product where name="{}" call uninstall /nointeractive"#,
        display_name.trim().replace('"', "\\\"")
    )
}

/// 通过 WMI 请求卸载
///
/// 退出码 0 只表示请求被接受，并不保证程序已被移除
pub async fn attempt<R: CommandRunner>(runner: &R, display_name: &str) -> (String, StrategyOutcome) {
    status(format!("尝试通过 WMI 卸载 '{}'...", display_name));
    let command = build_command(display_name);

    match executor::execute(runner, &command).await {
        Ok(output) => {
            if utils::contains_ignore_case(&output.stdout, NO_INSTANCE_MARKER)
                || utils::contains_ignore_case(&output.stderr, NO_INSTANCE_MARKER)
            {
                tracing::warn!("WMI 未报告匹配的产品实例: {}", display_name);
            }
            status(format!("  - WMI 卸载请求已提交: {}", display_name));
            (command, StrategyOutcome::Succeeded(Confirmation::Requested))
        }
        Err(e) => {
            let detail = describe_failure(&e);
            status_warn(format!("  - WMI 卸载失败: {}", detail));
            (command, StrategyOutcome::Failed(detail))
        }
    }
}
