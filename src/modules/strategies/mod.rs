//! 卸载策略
//!
//! 每个策略独立构造并执行自己的外部命令，返回 (作用对象, 结果)

pub mod feature;
pub mod management;
pub mod models;
pub mod package;
pub mod registry_command;

pub use models::{Attempt, Confirmation, StrategyOutcome, UninstallStrategy};
