use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::{CommandOutput, CommandRunner};
use crate::modules::common::error::UninstallerError;

/// 通过 `cmd /C` (非 Windows 平台为 `sh -c`) 执行命令，超时后结束子进程
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout: Duration,
}

impl ShellRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn shell_command(command: &str) -> Command {
        #[cfg(windows)]
        {
            // 命令行原样交给 cmd，避免对引号再次转义
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").raw_arg(cmd_command_line(command));
            cmd
        }

        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }
}

/// `cmd /C` 之后的原始命令行
///
/// 命令含有两个以上引号或 `&<>()@^|` 时，cmd 会去掉第一个和最后一个引号，
/// 所以整体再包一层引号，剥掉后恰好还原原命令
pub fn cmd_command_line(command: &str) -> String {
    format!("\"{}\"", command)
}

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, UninstallerError> {
        let mut cmd = Self::shell_command(command);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd.spawn()?;
        tracing::debug!("子进程 PID: {:?}", child.id());

        // 超时后 future 被丢弃，kill_on_drop 负责结束子进程
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                UninstallerError::Timeout(format!(
                    "{} 秒内未结束: {}",
                    self.timeout.as_secs(),
                    command
                ))
            })??;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
