use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::error::UninstallerError;

/// 默认审计日志文件名 (位于当前工作目录)
pub const DEFAULT_LOG_FILE: &str = "uninstall.log";

/// 状态信息写到 stderr，stdout 留给机器可读的输出
static STATUS_ON_STDERR: AtomicBool = AtomicBool::new(false);

/// 初始化日志
///
/// 审计日志以追加方式写入 `log_file`，每个动作一行并带时间戳。
/// 日志文件无法打开时在 stderr 给出警告，继续运行但不写审计日志。
/// verbose 模式下同时输出到 stderr，并打开 debug 级别。
/// 返回的 guard 必须在进程结束前保持存活，否则尾部日志可能丢失。
pub fn init_logging(verbose: bool, log_file: &Path) -> Option<WorkerGuard> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let file_writer = match open_log_file(log_file) {
        Ok(appender) => Some(tracing_appender::non_blocking(appender)),
        Err(e) => {
            eprintln!("警告: 无法打开审计日志 {}: {}", log_file.display(), e);
            None
        }
    };
    let (writer, guard) = file_writer.unzip();

    let filter = tracing_subscriber::EnvFilter::new(format!(
        "rust_yu_fallback_lib={level},rust_yu_fallback={level},warn"
    ));

    let file_layer = writer.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(writer)
    });

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    match result {
        Ok(()) => guard,
        Err(e) => {
            eprintln!("日志初始化失败: {}", e);
            None
        }
    }
}

/// 以追加方式打开审计日志文件，必要时创建父目录
pub fn open_log_file(log_file: &Path) -> Result<RollingFileAppender, UninstallerError> {
    let (dir, file_name) = split_log_path(log_file);
    std::fs::create_dir_all(&dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&dir)
        .map_err(|e| UninstallerError::Config(format!("{}: {}", log_file.display(), e)))
}

/// 状态信息改写到 stderr (如输出 JSON 时)
pub fn route_status_to_stderr(enabled: bool) {
    STATUS_ON_STDERR.store(enabled, Ordering::Relaxed);
}

/// 打印一条状态信息，并写入同样内容的审计日志
pub fn status(message: impl AsRef<str>) {
    let message = message.as_ref();
    echo(message);
    tracing::info!("{}", audit_line(message));
}

/// 打印一条警告状态，并以 warn 级别写入审计日志
pub fn status_warn(message: impl AsRef<str>) {
    let message = message.as_ref();
    echo(message);
    tracing::warn!("{}", audit_line(message));
}

/// 控制台空行，不进入审计日志
pub fn blank_line() {
    echo("");
}

fn echo(message: &str) {
    if STATUS_ON_STDERR.load(Ordering::Relaxed) {
        eprintln!("{}", message);
    } else {
        println!("{}", message);
    }
}

/// 审计日志每个动作一行: 去掉首尾空白，内部换行折叠为 " | "
fn audit_line(message: &str) -> String {
    message
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn split_log_path(log_file: &Path) -> (PathBuf, String) {
    let file_name = log_file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    let dir = log_file
        .parent()
        .map(Path::to_path_buf)
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from("."));
    (dir, file_name)
}
