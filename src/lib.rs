pub mod commands;
pub mod modules;

pub use modules::common::error::UninstallerError;
pub use modules::common::utils;
pub use modules::executor;
pub use modules::orchestrator;
pub use modules::rules;
pub use modules::scanner;
pub use modules::strategies;
