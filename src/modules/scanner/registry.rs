use super::models::SoftwareRecord;
use super::RecordStore;
use crate::modules::common::error::UninstallerError;
use crate::modules::common::utils;
use winreg::enums::*;
use winreg::{RegKey, HKEY};

const UNINSTALL_PATH: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";
const UNINSTALL_PATH_WOW64: &str =
    r"SOFTWARE\WOW6432Node\Microsoft\Windows\CurrentVersion\Uninstall";

/// 注册表中的一个 Uninstall 分支
pub struct RegistryStore {
    hkey: HKEY,
    path: &'static str,
    label: String,
}

impl RegistryStore {
    pub fn new(hkey: HKEY, hive_name: &str, path: &'static str) -> Self {
        Self {
            hkey,
            path,
            label: format!("{}\\{}", hive_name, path),
        }
    }
}

/// 系统范围 (含 32 位视图) 在前，当前用户在后
pub fn uninstall_stores() -> Vec<Box<dyn RecordStore>> {
    vec![
        Box::new(RegistryStore::new(HKEY_LOCAL_MACHINE, "HKLM", UNINSTALL_PATH)),
        Box::new(RegistryStore::new(
            HKEY_LOCAL_MACHINE,
            "HKLM",
            UNINSTALL_PATH_WOW64,
        )),
        Box::new(RegistryStore::new(HKEY_CURRENT_USER, "HKCU", UNINSTALL_PATH)),
    ]
}

impl RecordStore for RegistryStore {
    fn label(&self) -> &str {
        &self.label
    }

    fn records(&self) -> Result<Vec<Result<SoftwareRecord, UninstallerError>>, UninstallerError> {
        let key = RegKey::predef(self.hkey)
            .open_subkey(self.path)
            .map_err(|e| UninstallerError::LookupFailed(format!("{}: {}", self.label, e)))?;

        let mut records = Vec::new();
        for name in key.enum_keys() {
            let name = match name {
                Ok(name) => name,
                Err(e) => {
                    records.push(Err(UninstallerError::LookupFailed(e.to_string())));
                    continue;
                }
            };

            match key.open_subkey(&name) {
                Ok(subkey) => {
                    let key_id = format!("{}\\{}", self.label, name);
                    if let Some(record) = parse_uninstall_entry(&subkey, key_id) {
                        records.push(Ok(record));
                    }
                }
                Err(e) => records.push(Err(UninstallerError::LookupFailed(format!(
                    "{}\\{}: {}",
                    self.label, name, e
                )))),
            }
        }

        Ok(records)
    }
}

/// 解析一个卸载子键，没有 DisplayName 的不是候选
fn parse_uninstall_entry(subkey: &RegKey, registry_key_id: String) -> Option<SoftwareRecord> {
    let display_name = utils::non_empty(subkey.get_value("DisplayName").ok())?;

    let mut record = SoftwareRecord::new(display_name, registry_key_id);
    record.uninstall_command = utils::non_empty(subkey.get_value("UninstallString").ok());
    record.quiet_uninstall_command =
        utils::non_empty(subkey.get_value("QuietUninstallString").ok());

    Some(record)
}
