//! 回退卸载流程
//!
//! 注册表命令 → WMI → Appx 包 → DISM 功能，按顺序执行，第一个成功即停止。
//! 每个状态转移都会打印并写入审计日志，外部命令的失败只会推动流程进入下一个状态。

pub mod models;

use chrono::Utc;
use uuid::Uuid;

use crate::modules::common::error::UninstallerError;
use crate::modules::common::logging::{blank_line, status, status_warn};
use crate::modules::executor::CommandRunner;
use crate::modules::rules::Rules;
use crate::modules::scanner::{self, models::ScanOutcome, models::SoftwareRecord, RecordStore};
use crate::modules::strategies::{
    feature, management, package, registry_command, Attempt, StrategyOutcome, UninstallStrategy,
};
pub use models::{FinalOutcome, RunReport};

#[derive(Debug)]
enum State {
    Searching,
    Found(SoftwareRecord),
    NotFound,
    FallbackManagement { display_name: String },
    FallbackPackage,
    FallbackFeature,
    Done(FinalOutcome),
}

pub struct Orchestrator<'a, R> {
    runner: &'a R,
    stores: &'a [Box<dyn RecordStore>],
    rules: &'a Rules,
}

impl<'a, R: CommandRunner> Orchestrator<'a, R> {
    pub fn new(runner: &'a R, stores: &'a [Box<dyn RecordStore>], rules: &'a Rules) -> Self {
        Self {
            runner,
            stores,
            rules,
        }
    }

    /// 执行完整的回退流程，不会因外部命令失败而报错
    pub async fn run(&self, target: &str) -> RunReport {
        let target = target.trim().to_string();
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::debug!("运行 {} 开始, 目标: {}", run_id, target);

        let mut record = None;
        let mut attempts = Vec::new();
        let mut state = State::Searching;

        let outcome = loop {
            tracing::debug!("状态: {:?}", state);
            state = match state {
                State::Searching => {
                    blank_line();
                    status(format!("搜索要卸载的程序 '{}'...", target));
                    match scanner::find_software(self.stores, &target) {
                        ScanOutcome::Found(found) => {
                            print_record(&found);
                            record = Some(found.clone());
                            if found.preferred_command().is_some() {
                                State::Found(found)
                            } else {
                                let missing = UninstallerError::CommandMissing(found.display_name);
                                status_warn(format!("  - {}", missing));
                                State::NotFound
                            }
                        }
                        ScanOutcome::NotFound => {
                            status(format!("未找到匹配 '{}' 的已安装程序", target));
                            State::NotFound
                        }
                    }
                }
                State::Found(found) => {
                    blank_line();
                    status(format!("执行 '{}' 的卸载命令...", found.display_name));
                    let (subject, outcome) =
                        registry_command::attempt(self.runner, &found, self.rules).await;
                    record_attempt(
                        &mut attempts,
                        UninstallStrategy::RegistryCommand,
                        subject,
                        outcome,
                        State::FallbackManagement {
                            display_name: found.display_name,
                        },
                    )
                }
                State::NotFound => State::FallbackManagement {
                    display_name: target.clone(),
                },
                State::FallbackManagement { display_name } => {
                    let (subject, outcome) = management::attempt(self.runner, &display_name).await;
                    record_attempt(
                        &mut attempts,
                        UninstallStrategy::ManagementInterface,
                        subject,
                        outcome,
                        State::FallbackPackage,
                    )
                }
                State::FallbackPackage => {
                    let search_term = self.rules.package_search_term(&target);
                    let (subject, outcome) = package::attempt(self.runner, search_term).await;
                    record_attempt(
                        &mut attempts,
                        UninstallStrategy::PackageManager,
                        subject,
                        outcome,
                        State::FallbackFeature,
                    )
                }
                State::FallbackFeature => {
                    let (subject, outcome) = feature::attempt(self.runner, &target).await;
                    record_attempt(
                        &mut attempts,
                        UninstallStrategy::FeatureDisable,
                        subject,
                        outcome,
                        State::Done(FinalOutcome::Exhausted),
                    )
                }
                State::Done(outcome) => break outcome,
            };
        };

        match &outcome {
            FinalOutcome::Success {
                strategy,
                confirmation,
            } => tracing::info!(
                "'{}' 处理完成: {} ({:?})",
                target,
                strategy.label(),
                confirmation
            ),
            FinalOutcome::Exhausted => {
                tracing::warn!("'{}' 的所有卸载方式均未成功", target)
            }
        }

        RunReport {
            run_id,
            target,
            record,
            attempts,
            outcome,
            started_at,
            finished_at: Utc::now(),
        }
    }
}

/// 记录一次尝试；成功则结束，否则进入 `next`
fn record_attempt(
    attempts: &mut Vec<Attempt>,
    strategy: UninstallStrategy,
    subject: String,
    outcome: StrategyOutcome,
    next: State,
) -> State {
    let done = match &outcome {
        StrategyOutcome::Succeeded(confirmation) => Some(FinalOutcome::Success {
            strategy,
            confirmation: *confirmation,
        }),
        _ => None,
    };

    attempts.push(Attempt {
        strategy,
        subject,
        outcome,
    });

    match done {
        Some(outcome) => State::Done(outcome),
        None => next,
    }
}

fn print_record(record: &SoftwareRecord) {
    blank_line();
    status(format!("找到程序: {}", record.display_name));
    status(format!("  - 注册表项: {}", record.registry_key_id));
    status(format!(
        "  - 卸载命令: {}",
        record.preferred_command().unwrap_or("无")
    ));
}
