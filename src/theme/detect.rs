//! macOS 系统主题检测

use std::process::Command;

/// 检测系统是否处于深色模式
///
/// macOS 上读取 `AppleInterfaceStyle`：存在且为 "Dark" 即深色模式；
/// 读取失败（包括非 macOS 系统）一律按浅色模式处理。
pub fn detect_system_theme() -> bool {
    let output = Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output();

    match output {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .trim()
            .eq_ignore_ascii_case("dark"),
        _ => false,
    }
}
