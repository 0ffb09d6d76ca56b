use log::debug;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Execute a command and capture its output
pub fn execute_command(cmd: &str, args: &[&str]) -> std::io::Result<Output> {
    debug!("executing: {} {}", cmd, args.join(" "));

    Command::new(cmd).args(args).output()
}

/// Execute a command in a working directory and capture its output
pub fn execute_command_in(cmd: &str, args: &[&str], dir: &Path) -> std::io::Result<Output> {
    debug!("executing in {}: {} {}", dir.display(), cmd, args.join(" "));

    Command::new(cmd).args(args).current_dir(dir).output()
}

/// Execute a command in a working directory without tracing its argv.
///
/// For invocations whose arguments carry credentials; the caller logs a
/// redacted trace instead.
pub fn execute_command_in_untraced(
    cmd: &str,
    args: &[&str],
    dir: &Path,
) -> std::io::Result<Output> {
    Command::new(cmd).args(args).current_dir(dir).output()
}

/// Execute a command with inherited stdout/stderr, returning its exit code.
///
/// Used for the final validation step where the tool's own report must reach
/// the terminal unmodified.
pub fn execute_command_passthrough(cmd: &str, args: &[&str]) -> std::io::Result<i32> {
    debug!("executing (passthrough): {} {}", cmd, args.join(" "));

    let status = Command::new(cmd)
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    Ok(status.code().unwrap_or(1))
}

/// Check if a command is available in PATH
pub fn is_command_available(cmd: &str) -> bool {
    Command::new(cmd)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Collect a command's stderr (falling back to stdout) as a trimmed string
pub fn command_diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_command_is_unavailable() {
        assert!(!is_command_available("definitely-not-a-real-binary-7a3f"));
    }

    #[test]
    fn test_diagnostic_prefers_stderr() {
        let output = Output {
            status: std::process::Command::new("true")
                .status()
                .expect("true should run"),
            stdout: b"out\n".to_vec(),
            stderr: b"err\n".to_vec(),
        };
        assert_eq!(command_diagnostic(&output), "err");
    }

    #[test]
    fn test_diagnostic_falls_back_to_stdout() {
        let output = Output {
            status: std::process::Command::new("true")
                .status()
                .expect("true should run"),
            stdout: b"only stdout\n".to_vec(),
            stderr: Vec::new(),
        };
        assert_eq!(command_diagnostic(&output), "only stdout");
    }
}
