use super::models::{Confirmation, StrategyOutcome};
use crate::modules::common::error::UninstallerError;
use crate::modules::common::logging::{status, status_warn};
use crate::modules::executor::{self, normalizer, CommandRunner};
use crate::modules::rules::Rules;
use crate::modules::scanner::models::SoftwareRecord;

/// 生成记录对应的最终卸载命令
pub fn prepare(record: &SoftwareRecord, rules: &Rules) -> Result<String, UninstallerError> {
    let raw = record
        .preferred_command()
        .ok_or_else(|| UninstallerError::CommandMissing(record.display_name.clone()))?;
    let normalized = normalizer::normalize(raw, &record.display_name, rules);
    Ok(executor::render_uninstall_command(&normalized))
}

/// 执行注册表中记录的卸载命令
pub async fn attempt<R: CommandRunner>(
    runner: &R,
    record: &SoftwareRecord,
    rules: &Rules,
) -> (String, StrategyOutcome) {
    let command = match prepare(record, rules) {
        Ok(command) => command,
        Err(e) => {
            status_warn(format!("  - {}", e));
            return (String::new(), StrategyOutcome::NotApplicable(e.to_string()));
        }
    };

    status(format!("  - 执行: {}", command));

    match executor::execute(runner, &command).await {
        Ok(_) => {
            status(format!("  - {} 卸载完成", record.display_name));
            (command, StrategyOutcome::Succeeded(Confirmation::Completed))
        }
        Err(e) => {
            let detail = describe_failure(&e);
            status_warn(format!("  - 卸载失败: {}", detail));
            (command, StrategyOutcome::Failed(detail))
        }
    }
}

pub(super) fn describe_failure(e: &UninstallerError) -> String {
    match e.diagnostic() {
        Some(diagnostic) => format!("{} ({})", e, diagnostic),
        None => e.to_string(),
    }
}
