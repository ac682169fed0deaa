//! 测试用的假注册表来源和假命令执行器

use std::sync::Mutex;

use crate::modules::common::error::UninstallerError;
use crate::modules::executor::{CommandOutput, CommandRunner};
use crate::modules::scanner::models::SoftwareRecord;
use crate::modules::scanner::RecordStore;

pub struct FakeStore {
    label: String,
    available: bool,
    entries: Vec<Result<SoftwareRecord, String>>,
}

impl FakeStore {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            available: true,
            entries: Vec::new(),
        }
    }

    /// 整个来源都无法打开
    pub fn failing(label: &str) -> Self {
        Self {
            available: false,
            ..Self::new(label)
        }
    }

    pub fn with_record(mut self, record: SoftwareRecord) -> Self {
        self.entries.push(Ok(record));
        self
    }

    /// 一条读取失败的记录
    pub fn with_error(mut self, message: &str) -> Self {
        self.entries.push(Err(message.to_string()));
        self
    }

    pub fn boxed(self) -> Vec<Box<dyn RecordStore>> {
        vec![Box::new(self)]
    }
}

impl RecordStore for FakeStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn records(&self) -> Result<Vec<Result<SoftwareRecord, UninstallerError>>, UninstallerError> {
        if !self.available {
            return Err(UninstallerError::LookupFailed(format!("{} 拒绝访问", self.label)));
        }
        Ok(self
            .entries
            .iter()
            .map(|entry| {
                entry
                    .clone()
                    .map_err(UninstallerError::LookupFailed)
            })
            .collect())
    }
}

enum FakeResponse {
    Output(CommandOutput),
    Timeout,
}

/// 按子串匹配命令返回预设结果，并记录所有调用
///
/// 没有匹配的命令返回退出码 1
pub struct FakeRunner {
    responses: Vec<(String, FakeResponse)>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn exit(code: i32, stdout: &str, stderr: &str) -> CommandOutput {
        CommandOutput {
            exit_code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    pub fn respond(mut self, pattern: &str, output: CommandOutput) -> Self {
        self.responses
            .push((pattern.to_string(), FakeResponse::Output(output)));
        self
    }

    pub fn succeed(self, pattern: &str) -> Self {
        self.respond(pattern, Self::exit(0, "", ""))
    }

    pub fn fail(self, pattern: &str) -> Self {
        self.respond(pattern, Self::exit(1, "", "failed"))
    }

    pub fn time_out(mut self, pattern: &str) -> Self {
        self.responses.push((pattern.to_string(), FakeResponse::Timeout));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, UninstallerError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(command.to_string());

        match self
            .responses
            .iter()
            .find(|(pattern, _)| command.contains(pattern.as_str()))
        {
            Some((_, FakeResponse::Output(output))) => Ok(output.clone()),
            Some((_, FakeResponse::Timeout)) => {
                Err(UninstallerError::Timeout(command.to_string()))
            }
            None => Ok(Self::exit(1, "", "unexpected command")),
        }
    }
}
