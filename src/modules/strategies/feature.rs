use super::models::{Confirmation, StrategyOutcome};
use super::registry_command::describe_failure;
use crate::modules::common::logging::{status, status_warn};
use crate::modules::common::utils;
use crate::modules::executor::{self, CommandRunner};

pub const LIST_FEATURES_COMMAND: &str = "DISM /Online /Get-Features /Format:Table";

pub fn build_disable_command(feature: &str) -> String {
    format!("DISM /Online /Disable-Feature /FeatureName:{} /NoRestart", feature)
}

/// 从 `DISM /Get-Features /Format:Table` 的输出中找到第一个名称包含关键字的功能
///
/// 最后一条分隔线之前的行 (表头) 不参与匹配；没有分隔线时匹配所有表格行
pub fn find_feature(table: &str, keyword: &str) -> Option<String> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return None;
    }

    let rows: Vec<&str> = table
        .lines()
        .filter(|line| line.contains('|'))
        .map(|line| line.split('|').next().unwrap_or_default().trim())
        .collect();

    let body = match rows.iter().rposition(|cell| cell.starts_with("---")) {
        Some(separator) => &rows[separator + 1..],
        None => &rows[..],
    };

    body.iter()
        .find(|name| !name.is_empty() && utils::contains_ignore_case(name, keyword))
        .map(|name| name.to_string())
}

/// 通过 DISM 禁用名称匹配的 Windows 功能
pub async fn attempt<R: CommandRunner>(runner: &R, keyword: &str) -> (String, StrategyOutcome) {
    status(format!("尝试通过 DISM 禁用匹配 '{}' 的 Windows 功能...", keyword));

    let table = match executor::execute(runner, LIST_FEATURES_COMMAND).await {
        Ok(output) => output.stdout,
        Err(e) => {
            let detail = describe_failure(&e);
            status_warn(format!("  - 无法列出 Windows 功能: {}", detail));
            return (keyword.to_string(), StrategyOutcome::Failed(detail));
        }
    };

    let Some(feature) = find_feature(&table, keyword) else {
        let message = format!("未找到匹配 '{}' 的 Windows 功能", keyword);
        status(format!("  - {}", message));
        return (keyword.to_string(), StrategyOutcome::NotApplicable(message));
    };

    status(format!("  - 找到功能: {}", feature));

    match executor::execute(runner, &build_disable_command(&feature)).await {
        Ok(_) => {
            status(format!("  - 已禁用功能: {}", feature));
            (feature, StrategyOutcome::Succeeded(Confirmation::Completed))
        }
        Err(e) => {
            let detail = describe_failure(&e);
            status_warn(format!("  - 禁用功能失败: {}", detail));
            (feature, StrategyOutcome::Failed(detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::FakeRunner;

    const FEATURE_TABLE: &str = "\r\n\
Deployment Image Servicing and Management tool\r\n\
Version: 10.0.22621.2792\r\n\
\r\n\
Image Version: 10.0.22631.3296\r\n\
\r\n\
Features listing for package : Microsoft-Windows-Foundation-Package~31bf3856ad364e35~amd64~~10.0.22621.1\r\n\
\r\n\
------------------------------------------- | --------\r\n\
Feature Name                                | State   \r\n\
------------------------------------------- | --------\r\n\
Printing-PrintToPDFServices-Features        | Enabled \r\n\
TelnetClient                                | Disabled\r\n\
Microsoft-Hyper-V-All                       | Disabled\r\n\
\r\n\
The operation completed successfully.\r\n";

    #[test]
    fn finds_first_feature_containing_keyword() {
        assert_eq!(
            find_feature(FEATURE_TABLE, "telnet"),
            Some("TelnetClient".to_string())
        );
        assert_eq!(
            find_feature(FEATURE_TABLE, "HYPER-V"),
            Some("Microsoft-Hyper-V-All".to_string())
        );
    }

    #[test]
    fn header_row_is_not_a_feature() {
        assert_eq!(find_feature(FEATURE_TABLE, "feature name"), None);
        assert_eq!(find_feature(FEATURE_TABLE, "state"), None);
    }

    #[test]
    fn table_without_separator_is_matched_row_by_row() {
        let table = "Foo | Enabled\nBarBaz | Disabled\n";
        assert_eq!(find_feature(table, "baz"), Some("BarBaz".to_string()));
        assert_eq!(find_feature(table, ""), None);
    }

    #[tokio::test]
    async fn disables_matching_feature() {
        let runner = FakeRunner::new()
            .respond("/Get-Features", FakeRunner::exit(0, FEATURE_TABLE, ""))
            .succeed("/Disable-Feature");

        let (subject, outcome) = attempt(&runner, "telnet").await;
        assert_eq!(subject, "TelnetClient");
        assert_eq!(outcome, StrategyOutcome::Succeeded(Confirmation::Completed));
        assert_eq!(
            runner.calls().last().map(String::as_str),
            Some("DISM /Online /Disable-Feature /FeatureName:TelnetClient /NoRestart")
        );
    }

    #[tokio::test]
    async fn listing_failure_is_failure() {
        let runner = FakeRunner::new().respond(
            "/Get-Features",
            FakeRunner::exit(740, "", "Elevated permissions are required"),
        );
        let (_, outcome) = attempt(&runner, "telnet").await;
        match outcome {
            StrategyOutcome::Failed(detail) => assert!(detail.contains("Elevated")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
