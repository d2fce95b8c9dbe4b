//! Silent external command execution

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Shell used to run commands; empty configuration falls back to the platform shell
pub fn resolve_shell(configured: &str) -> String {
    if !configured.is_empty() {
        return configured.to_string();
    }
    if cfg!(windows) {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    } else {
        "/bin/sh".to_string()
    }
}

/// Flag that makes `shell` run a single command string
pub fn shell_command_flag(shell: &str) -> &'static str {
    let lower = shell.to_lowercase();
    if lower.contains("powershell") || lower.contains("pwsh") {
        "-Command"
    } else if cfg!(windows) {
        "/C"
    } else {
        "-c"
    }
}

/// Run `command` through `shell` in `cwd` and wait for it.
///
/// Standard input, output and error are all discarded so the command can
/// never draw over the interface. The terminal stays in raw mode meanwhile.
pub fn run_silent(shell: &str, command: &str, cwd: &Path) -> io::Result<ExitStatus> {
    tracing::info!("Running `{}` in {}", command, cwd.display());
    let status = Command::new(shell)
        .arg(shell_command_flag(shell))
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    if status.success() {
        tracing::debug!("`{}` finished", command);
    } else {
        tracing::warn!("`{}` exited with {}", command, status);
    }
    Ok(status)
}
