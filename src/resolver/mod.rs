//! Chart source resolution: repository fetch or git checkout.

pub mod git;
pub mod repository;

use crate::config::Config;
use crate::error::{Result, SourceError};
use crate::manifest::ChartSource;
use crate::workspace::Workspace;
use std::path::PathBuf;

/// Fetch the chart into the workspace and return its directory.
///
/// Repository sources are pulled with the chart manager; git sources are
/// checked out with the version-control client. The first failing tool
/// invocation aborts the run.
pub fn resolve(source: &ChartSource, workspace: &Workspace, config: &Config) -> Result<PathBuf> {
    let chart_dir = match source {
        ChartSource::Repository {
            repository,
            name,
            version,
        } => repository::fetch_chart(repository, name, version, workspace, config)?,
        ChartSource::Git { url, git_ref, path } => {
            git::checkout_chart(url, git_ref, path, workspace, config)?
        }
    };

    if !chart_dir.is_dir() {
        return Err(SourceError::MissingChartDir(chart_dir.display().to_string()).into());
    }

    Ok(chart_dir)
}
