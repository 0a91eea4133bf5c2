// src/config/platform.rs

//! Locating the `wakatime-cli` binary.
//!
//! WakaTime editor plugins install a per-platform build under
//! `~/.wakatime/` named `wakatime-cli-<os>-<arch>` (Go's GOOS/GOARCH
//! spelling). `WAKATIME_HOME` replaces the home directory when set.

use std::path::{Path, PathBuf};

pub const WAKATIME_HOME_ENV: &str = "WAKATIME_HOME";
pub const WAKATIME_DIR: &str = ".wakatime";

/// Map Rust's `std::env::consts::OS` to the name used in release assets.
pub fn wakatime_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Map Rust's `std::env::consts::ARCH` to Go's GOARCH spelling.
pub fn wakatime_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "x86" => "386",
        "powerpc64" => "ppc64",
        "riscv64" => "riscv64",
        other => other,
    }
}

/// File name of the binary for the given platform.
pub fn cli_binary_name(os: &str, arch: &str) -> String {
    let ext = if os == "windows" { ".exe" } else { "" };
    format!("wakatime-cli-{}-{}{}", wakatime_os(os), wakatime_arch(arch), ext)
}

/// `<base>/.wakatime/wakatime-cli-<os>-<arch>`, where `base` is
/// `wakatime_home` if given, else `home`.
pub fn cli_path_in(
    wakatime_home: Option<&Path>,
    home: Option<&Path>,
    os: &str,
    arch: &str,
) -> Option<PathBuf> {
    let base = wakatime_home.or(home)?;
    Some(base.join(WAKATIME_DIR).join(cli_binary_name(os, arch)))
}

/// Default binary location for the running process.
///
/// Returns `None` only if no home directory can be determined.
pub fn default_cli_path() -> Option<PathBuf> {
    let wakatime_home = std::env::var_os(WAKATIME_HOME_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    let home = dirs::home_dir();
    cli_path_in(
        wakatime_home.as_deref(),
        home.as_deref(),
        std::env::consts::OS,
        std::env::consts::ARCH,
    )
}
