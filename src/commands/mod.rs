pub mod uninstall;

/// 某个卸载方式成功，或预览完成
pub const EXIT_SUCCESS: i32 = 0;
/// 所有卸载方式均失败，或启动阶段出错
pub const EXIT_FAILURE: i32 = 1;
/// 缺少程序名称
pub const EXIT_USAGE: i32 = 2;
