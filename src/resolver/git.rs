//! Git-sourced charts: init/remote/fetch/checkout into the workspace.

use crate::common::command_utils::{
    command_diagnostic, execute_command_in, execute_command_in_untraced,
};
use crate::config::Config;
use crate::error::{Result, SourceError};
use crate::workspace::Workspace;
use log::info;
use std::fs;
use std::path::PathBuf;

/// Environment variable holding a token for authenticated https fetches
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Mask the userinfo portion of an https URL for log output
pub fn redact_credentials(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("https://") {
        if let Some(at) = rest.find('@') {
            if !rest[..at].contains('/') {
                return format!("https://***@{}", &rest[at + 1..]);
            }
        }
    }
    url.to_string()
}

/// Embed a token credential into an https clone URL.
///
/// `https://github.com/org/repo` becomes `https://<token>@github.com/org/repo`.
/// Non-https URLs and empty tokens pass through unchanged.
pub fn with_token(url: &str, token: Option<&str>) -> String {
    match token {
        Some(token) if !token.is_empty() => {
            if let Some(rest) = url.strip_prefix("https://") {
                format!("https://{token}@{rest}")
            } else {
                url.to_string()
            }
        }
        _ => url.to_string(),
    }
}

/// Check out `git_ref` of `url` under the workspace and return the chart
/// directory (checkout root joined with the in-repo chart subpath).
pub fn checkout_chart(
    url: &str,
    git_ref: &str,
    chart_path: &str,
    workspace: &Workspace,
    config: &Config,
) -> Result<PathBuf> {
    let git = config.git_bin();
    let token = std::env::var(TOKEN_ENV_VAR).ok();
    let remote = with_token(url, token.as_deref());

    let source_dir = workspace.git_source_dir();
    fs::create_dir_all(&source_dir)?;

    // The remote URL may carry the token: progress output and the debug
    // trace only ever see the redacted form.
    info!("checking out ref {} of the chart repository", git_ref);
    run_git(git, &["init", "-q"], &source_dir)?;
    log::debug!(
        "executing in {}: {} remote add origin {}",
        source_dir.display(),
        git,
        redact_credentials(&remote)
    );
    let output = execute_command_in_untraced(git, &["remote", "add", "origin", &remote], &source_dir)?;
    if !output.status.success() {
        return Err(SourceError::Git(command_diagnostic(&output)).into());
    }
    run_git(git, &["fetch", "-q", "origin"], &source_dir)?;
    run_git(git, &["checkout", "-q", git_ref], &source_dir)?;

    Ok(source_dir.join(chart_path))
}

fn run_git(git: &str, args: &[&str], dir: &std::path::Path) -> Result<()> {
    let output = execute_command_in(git, args, dir)?;
    if !output.status.success() {
        return Err(SourceError::Git(command_diagnostic(&output)).into());
    }
    Ok(())
}
