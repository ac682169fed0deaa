//! 已安装程序扫描
//!
//! 依次查询系统范围和当前用户的卸载记录，返回第一条显示名包含目标的记录

pub mod models;
#[cfg(windows)]
pub mod registry;

use crate::modules::common::error::UninstallerError;
use models::{ScanOutcome, SoftwareRecord};

/// 一个可枚举的卸载记录来源 (如某个注册表分支)
pub trait RecordStore {
    fn label(&self) -> &str;

    /// 按枚举顺序返回记录；单条记录读取失败以 Err 返回，由扫描跳过
    fn records(&self) -> Result<Vec<Result<SoftwareRecord, UninstallerError>>, UninstallerError>;
}

/// 本机的卸载记录来源，系统范围在前，用户范围在后
pub fn default_stores() -> Vec<Box<dyn RecordStore>> {
    #[cfg(windows)]
    {
        registry::uninstall_stores()
    }

    #[cfg(not(windows))]
    {
        tracing::debug!("非 Windows 平台，没有可用的注册表来源");
        Vec::new()
    }
}

/// 按来源顺序查找第一条匹配记录
pub fn find_software(stores: &[Box<dyn RecordStore>], target: &str) -> ScanOutcome {
    let target = target.trim();
    if target.is_empty() {
        return ScanOutcome::NotFound;
    }

    for store in stores {
        let records = match store.records() {
            Ok(records) => records,
            Err(e) => {
                tracing::debug!("跳过来源 {}: {}", store.label(), e);
                continue;
            }
        };

        for record in records {
            match record {
                Ok(record) if record.matches(target) => {
                    tracing::debug!("在 {} 中匹配到 {}", store.label(), record.registry_key_id);
                    return ScanOutcome::Found(record);
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("跳过 {} 中无法读取的记录: {}", store.label(), e),
            }
        }
    }

    ScanOutcome::NotFound
}
