use std::path::PathBuf;
use std::process;

use clap::Parser;
use rust_yu_fallback_lib::commands::{self, EXIT_FAILURE};
use rust_yu_fallback_lib::modules::common::logging;

#[derive(Parser, Debug)]
#[command(name = "rust-yu-fallback")]
#[command(about = "按名称查找并卸载 Windows 程序，失败时依次回退到 WMI / Appx / DISM", long_about = None)]
#[command(version = "0.1.0")]
struct Cli {
    #[command(flatten)]
    uninstall: commands::uninstall::UninstallCommand,

    /// 审计日志文件 (追加写入)
    #[arg(long, default_value = logging::DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// 详细输出模式
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // guard 需要存活到进程退出前，保证审计日志写完
    let guard = logging::init_logging(cli.verbose, &cli.log_file);

    let code = match commands::uninstall::execute(cli.uninstall).await {
        Ok(code) => code,
        Err(e) => {
            if cli.verbose {
                tracing::error!("错误: {:#}", e);
            } else {
                tracing::error!("错误: {}", e);
                eprintln!("错误: {}", e);
            }
            EXIT_FAILURE
        }
    };

    drop(guard);
    process::exit(code);
}
