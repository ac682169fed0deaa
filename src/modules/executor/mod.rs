//! 外部命令执行
//!
//! 所有外部程序 (卸载程序、wmic、PowerShell、DISM) 都通过 `CommandRunner` 调用，
//! 方便在测试中替换为假实现

pub mod normalizer;
pub mod shell;

use crate::modules::common::error::UninstallerError;
use crate::modules::common::utils;
pub use normalizer::NormalizedCommand;
pub use shell::ShellRunner;

/// 子进程结束后的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// 被信号终止时为 None
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stderr 为空时退回 stdout
    pub fn diagnostic(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        }
    }
}

/// 通过宿主 shell 执行一条命令字符串
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, UninstallerError>;
}

/// 执行命令并记录前后日志，非零退出码转换为 `ExecutionFailed`
pub async fn execute<R: CommandRunner>(
    runner: &R,
    command: &str,
) -> Result<CommandOutput, UninstallerError> {
    tracing::info!("执行命令: {}", command);

    let output = match runner.run(command).await {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("命令未能完成: {}: {}", command, e);
            return Err(e);
        }
    };

    if output.success() {
        tracing::info!("命令执行成功: {}", command);
        Ok(output)
    } else {
        let diagnostic = output.diagnostic().to_string();
        tracing::warn!(
            "命令执行失败 (退出码 {:?}): {} {}",
            output.exit_code,
            command,
            diagnostic
        );
        Err(UninstallerError::ExecutionFailed {
            command: command.to_string(),
            exit_code: output.exit_code,
            output: diagnostic,
        })
    }
}

/// 生成最终执行的卸载命令
///
/// MSI 命令强制静默且不重启；其他命令追加规则中的额外参数
pub fn render_uninstall_command(normalized: &NormalizedCommand) -> String {
    if utils::is_msiexec_command(&normalized.command) {
        format!("cmd /c {} /qn /norestart", normalized.command)
    } else {
        match normalized.extra_params.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("{} {}", normalized.command, extra),
            _ => normalized.command.clone(),
        }
    }
}
