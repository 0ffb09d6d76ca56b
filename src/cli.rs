use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hrval")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate HelmRelease manifests against a Kubernetes API schema version")]
#[command(
    long_about = "Resolves the chart source of a HelmRelease manifest (chart repository or git), \
renders it with the manifest's inline values using helm, and validates the rendered Kubernetes \
manifests against the target API schema version with kubeconform (or kubeval)."
)]
pub struct Cli {
    /// Path to the HelmRelease manifest to validate
    #[arg(short = 'r', long = "helm-release", value_name = "PATH")]
    pub helm_release: PathBuf,

    /// Kubernetes schema version to validate against
    #[arg(long, value_name = "VERSION")]
    pub kube_version: Option<String>,

    /// Render the chart with empty values instead of spec.values
    #[arg(long)]
    pub ignore_values: bool,

    /// Enable debug logging (invoked command lines, working directory)
    #[arg(long)]
    pub debug: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Initialize logging based on the debug flag
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
