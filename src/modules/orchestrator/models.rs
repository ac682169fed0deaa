use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::modules::scanner::models::SoftwareRecord;
use crate::modules::strategies::{Attempt, Confirmation, UninstallStrategy};

/// 整次运行的最终状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FinalOutcome {
    Success {
        strategy: UninstallStrategy,
        confirmation: Confirmation,
    },
    /// 所有策略都已尝试且均未成功
    Exhausted,
}

/// 一次卸载运行的完整记录
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub target: String,
    /// 扫描命中的记录 (包括没有卸载命令的记录)
    pub record: Option<SoftwareRecord>,
    pub attempts: Vec<Attempt>,
    pub outcome: FinalOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, FinalOutcome::Success { .. })
    }

    /// 任一策略成功为 0，全部失败为 1
    pub fn exit_code(&self) -> i32 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }

    pub fn strategies_attempted(&self) -> Vec<UninstallStrategy> {
        self.attempts.iter().map(|a| a.strategy).collect()
    }
}
