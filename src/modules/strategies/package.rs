use super::models::{Confirmation, StrategyOutcome};
use super::registry_command::describe_failure;
use crate::modules::common::logging::{status, status_warn};
use crate::modules::common::utils;
use crate::modules::executor::{self, CommandRunner};

const POWERSHELL: &str = "powershell -NoProfile -ExecutionPolicy Bypass -Command";

/// PowerShell 单引号字符串转义，同时去掉会截断外层双引号的字符
fn escape_ps_literal(value: &str) -> String {
    value.replace('"', "").replace('\'', "''")
}

/// 查询名称包含搜索词的 Appx 包全名，找不到时输出空
pub fn build_query_command(search_term: &str) -> String {
    let script = format!(
        "try {{ $pkg = Get-AppxPackage | Where-Object {{ $_.Name -like '*{}*' }} | \
         Select-Object -ExpandProperty PackageFullName -ErrorAction SilentlyContinue; \
         if ($pkg) {{ Write-Output $pkg }} else {{ Write-Output '' }} }} catch {{ Write-Output '' }}",
        escape_ps_literal(search_term)
    );
    format!(r#"{} "{}""#, POWERSHELL, script)
}

pub fn build_remove_command(package_full_name: &str) -> String {
    format!(
        r#"{} "Remove-AppxPackage -Package '{}'""#,
        POWERSHELL,
        escape_ps_literal(package_full_name)
    )
}

/// 查找并移除 Appx 包
///
/// 同样只能确认移除请求被接受
pub async fn attempt<R: CommandRunner>(runner: &R, search_term: &str) -> (String, StrategyOutcome) {
    status(format!("尝试移除匹配 '{}' 的 Appx 包...", search_term));

    let full_name = match executor::execute(runner, &build_query_command(search_term)).await {
        Ok(output) => utils::first_non_empty_line(&output.stdout).map(str::to_string),
        Err(e) => {
            tracing::warn!("查询 Appx 包失败: {}", describe_failure(&e));
            None
        }
    };

    let Some(full_name) = full_name else {
        let message = format!("未找到匹配 '{}' 的 Appx 包", search_term);
        status(format!("  - {}", message));
        return (search_term.to_string(), StrategyOutcome::NotApplicable(message));
    };

    status(format!("  - 找到包: {}", full_name));

    match executor::execute(runner, &build_remove_command(&full_name)).await {
        Ok(_) => {
            status(format!("  - Appx 包移除请求已提交: {}", full_name));
            (full_name, StrategyOutcome::Succeeded(Confirmation::Requested))
        }
        Err(e) => {
            let detail = describe_failure(&e);
            status_warn(format!("  - Appx 包移除失败: {}", detail));
            (full_name, StrategyOutcome::Failed(detail))
        }
    }
}
