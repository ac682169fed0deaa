use thiserror::Error;

#[derive(Error, Debug)]
pub enum UninstallerError {
    /// 记录存在，但 QuietUninstallString / UninstallString 均为空
    #[error("未找到可用的卸载命令: {0}")]
    CommandMissing(String),

    #[error("命令执行失败 (退出码 {exit_code:?}): {command}")]
    ExecutionFailed {
        command: String,
        exit_code: Option<i32>,
        output: String,
    },

    /// 查询注册表分支或读取子键失败，扫描会跳过并继续
    #[error("查询失败: {0}")]
    LookupFailed(String),

    #[error("超时: {0}")]
    Timeout(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("文件系统错误: {0}")]
    FileSystem(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serde(String),
}

impl UninstallerError {
    /// 失败时捕获到的输出 (stderr 优先)，用于日志和报告
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Self::ExecutionFailed { output, .. } if !output.trim().is_empty() => {
                Some(output.trim())
            }
            _ => None,
        }
    }
}

impl serde::Serialize for UninstallerError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_only_for_non_empty_execution_output() {
        let failed = UninstallerError::ExecutionFailed {
            command: "foo.exe".to_string(),
            exit_code: Some(2),
            output: "  access denied \n".to_string(),
        };
        assert_eq!(failed.diagnostic(), Some("access denied"));

        let silent = UninstallerError::ExecutionFailed {
            command: "foo.exe".to_string(),
            exit_code: Some(2),
            output: String::new(),
        };
        assert_eq!(silent.diagnostic(), None);
        assert_eq!(UninstallerError::Timeout("x".into()).diagnostic(), None);
    }
}
