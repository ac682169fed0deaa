//! 卸载命令 - 查找程序并依次尝试各种卸载方式

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, ValueEnum};

use super::{EXIT_SUCCESS, EXIT_USAGE};
use crate::modules::common::logging::{self, status};
use crate::modules::common::utils;
use crate::modules::executor::ShellRunner;
use crate::modules::orchestrator::{FinalOutcome, Orchestrator, RunReport};
use crate::modules::rules::{self, Rules};
use crate::modules::scanner::{self, models::ScanOutcome};
use crate::modules::strategies::{registry_command, Confirmation, StrategyOutcome, UninstallStrategy};

#[derive(Args, Debug)]
pub struct UninstallCommand {
    /// 程序名称 (不区分大小写的子串)
    pub target: Option<String>,

    /// 只搜索并显示将要执行的卸载命令，不执行
    #[arg(long)]
    pub dry_run: bool,

    /// 规则文件 (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 每个外部命令的超时时间 (秒)，覆盖规则文件
    #[arg(long, env = "RUST_YU_TIMEOUT")]
    pub timeout: Option<u64>,

    /// 输出格式
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// 运行结果的输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// JSON 独占 stdout，状态信息改走 stderr
    pub fn status_on_stderr(self) -> bool {
        self == OutputFormat::Json
    }
}

/// 执行卸载，返回进程退出码
pub async fn execute(cmd: UninstallCommand) -> Result<i32> {
    logging::route_status_to_stderr(cmd.format.status_on_stderr());

    let rules = rules::load_rules(cmd.config.as_deref())?;

    let Some(target) = resolve_target(cmd.target.as_deref(), &rules) else {
        print_usage();
        return Ok(EXIT_USAGE);
    };

    if cmd.dry_run {
        plan(&target, &rules);
        return Ok(EXIT_SUCCESS);
    }

    let timeout_secs = cmd.timeout.filter(|t| *t > 0).unwrap_or(rules.timeout_secs);
    let runner = ShellRunner::new(Duration::from_secs(timeout_secs));
    tracing::debug!("单步超时: {:?}", runner.timeout());

    let stores = scanner::default_stores();
    let report = Orchestrator::new(&runner, &stores, &rules)
        .run(&target)
        .await;

    print!("{}", render_report(&report, cmd.format)?);

    Ok(report.exit_code())
}

/// 预设程序名优先于命令行参数；空名称视为未提供
fn resolve_target(arg: Option<&str>, rules: &Rules) -> Option<String> {
    if let Some(predefined) = &rules.predefined_target {
        status(format!("使用预设程序名: '{}'", predefined));
        return Some(predefined.clone());
    }

    let target = arg.map(str::trim).filter(|t| !t.is_empty());
    if target.is_none() && arg.is_some() {
        eprintln!("错误: 程序名称不能为空");
    }
    target.map(str::to_string)
}

fn print_usage() {
    eprintln!("用法: rust-yu-fallback <程序名称>");
    eprintln!("示例:");
    eprintln!("  rust-yu-fallback firefox");
    eprintln!("  rust-yu-fallback paint");
}

/// 预览模式: 只扫描和规范化
fn plan(target: &str, rules: &Rules) {
    status(format!("=== 预览: {} ===", target));

    let stores = scanner::default_stores();
    match scanner::find_software(&stores, target) {
        ScanOutcome::Found(record) => {
            status(format!("找到程序: {}", record.display_name));
            status(format!("  - 注册表项: {}", record.registry_key_id));
            match registry_command::prepare(&record, rules) {
                Ok(command) => status(format!("  - 将执行: {}", command)),
                Err(e) => status(format!("  - {}", e)),
            }
        }
        ScanOutcome::NotFound => status(format!("未找到匹配 '{}' 的已安装程序", target)),
    }

    status(format!(
        "  - 失败后依次尝试: WMI, Appx 包 '{}', DISM 功能 '{}'",
        rules.package_search_term(target),
        target
    ));
}

/// 把运行结果渲染为 stdout 的完整内容
pub fn render_report(report: &RunReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
        OutputFormat::Table => Ok(render_table(report)?),
    }
}

fn render_table(report: &RunReport) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "\n{}", "=".repeat(80))?;
    writeln!(out, "{:<16} {:<40} {:<20}", "方式", "对象", "结果")?;
    writeln!(out, "{}", "=".repeat(80))?;

    for attempt in &report.attempts {
        writeln!(
            out,
            "{:<16} {:<40} {:<20}",
            attempt.strategy.label(),
            utils::truncate_string(&attempt.subject, 39),
            outcome_label(&attempt.outcome)
        )?;
    }

    writeln!(out, "{}", "=".repeat(80))?;

    match &report.outcome {
        FinalOutcome::Success {
            strategy,
            confirmation,
        } => {
            let verb = match confirmation {
                Confirmation::Completed => "已完成",
                Confirmation::Requested => "已提交请求 (未确认实际移除)",
            };
            writeln!(out, "结果: 通过{}{}", strategy.label(), verb)?;
        }
        FinalOutcome::Exhausted => writeln!(
            out,
            "结果: 所有卸载方式 ({}) 均未成功",
            UninstallStrategy::ORDER
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(" → ")
        )?,
    }
    writeln!(out, "运行 ID: {}\n", report.run_id)?;
    Ok(out)
}

fn outcome_label(outcome: &StrategyOutcome) -> &'static str {
    match outcome {
        StrategyOutcome::Succeeded(Confirmation::Completed) => "成功",
        StrategyOutcome::Succeeded(Confirmation::Requested) => "已请求",
        StrategyOutcome::Failed(_) => "失败",
        StrategyOutcome::NotApplicable(_) => "未找到",
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::modules::scanner::models::SoftwareRecord;
    use crate::modules::testing::{FakeRunner, FakeStore};

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        uninstall: UninstallCommand,
    }

    async fn firefox_report(runner: &FakeRunner) -> RunReport {
        let stores = FakeStore::new("HKLM")
            .with_record(
                SoftwareRecord::new("Mozilla Firefox (x64 en-US)", "HKLM\\Mozilla Firefox")
                    .with_uninstall(r#""C:\Program Files\Mozilla Firefox\uninstall\helper.exe""#),
            )
            .boxed();
        let rules = Rules::default();
        Orchestrator::new(runner, &stores, &rules).run("firefox").await
    }

    #[test]
    fn argument_is_trimmed() {
        let rules = Rules::default();
        assert_eq!(
            resolve_target(Some("  firefox "), &rules),
            Some("firefox".to_string())
        );
    }

    #[test]
    fn missing_or_blank_argument_is_usage_error() {
        let rules = Rules::default();
        assert_eq!(resolve_target(None, &rules), None);
        assert_eq!(resolve_target(Some("   "), &rules), None);
    }

    #[test]
    fn predefined_target_bypasses_argument() {
        let rules = Rules {
            predefined_target: Some("firefox".to_string()),
            ..Rules::default()
        };
        assert_eq!(resolve_target(None, &rules), Some("firefox".to_string()));
        assert_eq!(
            resolve_target(Some("putty"), &rules),
            Some("firefox".to_string())
        );
    }

    #[test]
    fn outcome_labels_distinguish_requested_from_completed() {
        assert_ne!(
            outcome_label(&StrategyOutcome::Succeeded(Confirmation::Completed)),
            outcome_label(&StrategyOutcome::Succeeded(Confirmation::Requested))
        );
    }

    #[test]
    fn format_defaults_to_table() {
        let cli = TestCli::try_parse_from(["rust-yu-fallback", "firefox"]);
        let cli = cli.unwrap_or_else(|e| panic!("parse failed: {e}"));
        assert_eq!(cli.uninstall.format, OutputFormat::Table);
        assert!(!cli.uninstall.format.status_on_stderr());
    }

    #[test]
    fn json_format_moves_status_to_stderr() {
        let cli = TestCli::try_parse_from(["rust-yu-fallback", "--format", "json", "firefox"]);
        let cli = cli.unwrap_or_else(|e| panic!("parse failed: {e}"));
        assert_eq!(cli.uninstall.format, OutputFormat::Json);
        assert!(cli.uninstall.format.status_on_stderr());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result = TestCli::try_parse_from(["rust-yu-fallback", "--format", "yaml", "firefox"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn json_report_is_the_whole_stdout_document() {
        let runner = FakeRunner::new().fail("helper.exe").succeed("wmic");
        let report = firefox_report(&runner).await;

        let rendered = render_report(&report, OutputFormat::Json);
        let rendered = rendered.unwrap_or_else(|e| panic!("render failed: {e}"));
        let value: serde_json::Value =
            serde_json::from_str(&rendered).unwrap_or_else(|e| panic!("not json: {e}"));

        assert_eq!(value["target"], "firefox");
        assert_eq!(value["outcome"]["state"], "success");
        assert_eq!(value["outcome"]["strategy"], "management_interface");
        assert_eq!(value["attempts"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn table_report_lists_every_attempt() {
        let runner = FakeRunner::new().fail("helper.exe").succeed("wmic");
        let report = firefox_report(&runner).await;

        let rendered = render_report(&report, OutputFormat::Table);
        let rendered = rendered.unwrap_or_else(|e| panic!("render failed: {e}"));
        assert!(rendered.contains("失败"));
        assert!(rendered.contains("已请求"));
        assert!(rendered.contains(&report.run_id.to_string()));
    }
}
