//! # hrval
//!
//! A Rust-based command-line application that validates HelmRelease manifests:
//! it resolves the chart source (chart repository or git), renders the chart
//! with the manifest's inline values via `helm template`, and checks the
//! rendered Kubernetes manifests against a target API schema version in
//! strict mode.
//!
//! ## Features
//!
//! - **Source Resolution**: chart repositories (`helm repo add`/`helm pull`)
//!   and git references (`git fetch`/`checkout`), including token-authenticated
//!   https fetches
//! - **Strict Validation**: kubeconform (or kubeval) in strict mode, targeting
//!   a configurable Kubernetes version
//! - **Fail-Fast**: the first failing external tool aborts the run and its
//!   diagnostic is surfaced verbatim
//!
//! ## Example
//!
//! ```rust,no_run
//! use hrval_cli::{cli::Cli, run};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["hrval", "-r", "release.yaml", "--kube-version", "1.27.0"]);
//! if let Err(e) = run(&cli) {
//!     eprintln!("Error: {}", e);
//!     std::process::exit(e.exit_code());
//! }
//! ```

pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod manifest;
pub mod render;
pub mod resolver;
pub mod tools;
pub mod validate;
pub mod workspace;

// Re-export commonly used types and functions
pub use error::{HrvalError, Result};
pub use manifest::{ChartSource, HelmRelease};

use colored::Colorize;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the whole validation pipeline:
/// parse → check dependencies → resolve source → render → validate.
pub fn run(cli: &cli::Cli) -> Result<()> {
    let progress = |msg: &str| {
        if !cli.quiet {
            println!("{msg}");
        }
    };

    let config = config::load_config(Some(&cli.helm_release));
    let kube_version = cli
        .kube_version
        .clone()
        .unwrap_or_else(|| config.kube_version().to_string());

    let validator = tools::check_dependencies(&config)?;
    if let Some(version) = tools::helm_version(&config) {
        log::debug!("helm: {}", version);
    }

    progress(&format!(
        "🔍 Validating HelmRelease: {}",
        cli.helm_release.display()
    ));

    let release = HelmRelease::load(&cli.helm_release)?;
    let source = release.chart_source(&cli.helm_release)?;

    let workspace = workspace::Workspace::create()?;

    let from_git = matches!(source, ChartSource::Git { .. });
    match &source {
        ChartSource::Repository { name, version, .. } => {
            progress(&format!("📦 Fetching chart {} {} from repository", name, version));
        }
        ChartSource::Git { git_ref, path, .. } => {
            progress(&format!("📦 Checking out chart {} at ref {}", path, git_ref));
        }
    }
    let chart_dir = resolver::resolve(&source, &workspace, &config)?;

    progress(&format!("🛠️  Rendering release {}", release.release_name()));
    let release_file = render::render(
        &release,
        &chart_dir,
        &workspace,
        &config,
        from_git,
        cli.ignore_values,
    )?;

    progress(&format!(
        "🛡️  Validating rendered manifests against Kubernetes {}",
        kube_version
    ));
    validate::validate(&validator, &kube_version, &release_file)?;

    if !cli.quiet {
        println!(
            "{}",
            format!("✅ {} is a valid HelmRelease", cli.helm_release.display()).green()
        );
    }

    Ok(())
}
