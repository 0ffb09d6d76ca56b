//! Typed view of a HelmRelease manifest.
//!
//! The manifest is externally supplied YAML; only the fields the pipeline
//! needs are modelled, everything else (notably `spec.values`) is carried
//! as opaque YAML.

use crate::error::{ManifestError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const EXPECTED_KIND: &str = "HelmRelease";

#[derive(Debug, Clone, Deserialize)]
pub struct HelmRelease {
    #[serde(default)]
    pub kind: String,
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
    pub metadata: Metadata,
    pub spec: Spec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    pub name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    pub chart: Chart,
    #[serde(default)]
    pub release_name: Option<String>,
    #[serde(default)]
    pub target_namespace: Option<String>,
    #[serde(default)]
    pub values: Option<serde_yaml::Value>,
}

/// Chart source description. A repository source carries
/// `repository` + `name` + `version`; a git source carries
/// `git` + `ref` + `path`.
#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub git: Option<String>,
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

/// The two ways a chart can be sourced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSource {
    Repository {
        repository: String,
        name: String,
        version: String,
    },
    Git {
        url: String,
        git_ref: String,
        path: String,
    },
}

/// Minimal view used to check the `kind` discriminator before the full
/// HelmRelease shape is demanded. Non-HelmRelease manifests rarely satisfy
/// that shape, so probing first keeps the wrong-kind diagnostic descriptive.
#[derive(Debug, Deserialize)]
struct KindProbe {
    #[serde(default)]
    kind: String,
}

impl HelmRelease {
    /// Load and deserialize a HelmRelease manifest, rejecting any other kind
    pub fn load(path: &Path) -> Result<Self> {
        let display = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| ManifestError::Unreadable {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        let probe: KindProbe =
            serde_yaml::from_str(&content).map_err(|e| ManifestError::Parsing {
                path: display.clone(),
                reason: e.to_string(),
            })?;

        if probe.kind != EXPECTED_KIND {
            let kind = if probe.kind.is_empty() {
                "<missing>".to_string()
            } else {
                probe.kind
            };
            return Err(ManifestError::WrongKind {
                path: display,
                kind,
            }
            .into());
        }

        let release: HelmRelease =
            serde_yaml::from_str(&content).map_err(|e| ManifestError::Parsing {
                path: display,
                reason: e.to_string(),
            })?;

        Ok(release)
    }

    /// Release name used for `helm template`: explicit `spec.releaseName`,
    /// else `<namespace>-<name>` for a stable per-cluster-unique default.
    pub fn release_name(&self) -> String {
        match &self.spec.release_name {
            Some(name) => name.clone(),
            None => format!("{}-{}", self.metadata.namespace, self.metadata.name),
        }
    }

    /// Namespace the rendered manifests target
    pub fn target_namespace(&self) -> &str {
        self.spec
            .target_namespace
            .as_deref()
            .unwrap_or(&self.metadata.namespace)
    }

    /// Decide the chart source. `spec.chart.path` present signals a
    /// git-sourced chart, absence a repository-sourced one.
    pub fn chart_source(&self, manifest_path: &Path) -> Result<ChartSource> {
        let display = manifest_path.display().to_string();
        let chart = &self.spec.chart;

        if let Some(path) = &chart.path {
            let url = chart.git.clone().ok_or_else(|| ManifestError::IncompleteSource {
                path: display.clone(),
                reason: "spec.chart.path is set but spec.chart.git is missing".to_string(),
            })?;
            let git_ref = chart.git_ref.clone().ok_or_else(|| ManifestError::IncompleteSource {
                path: display.clone(),
                reason: "spec.chart.path is set but spec.chart.ref is missing".to_string(),
            })?;
            return Ok(ChartSource::Git {
                url,
                git_ref,
                path: path.clone(),
            });
        }

        let repository = chart.repository.clone().ok_or_else(|| ManifestError::IncompleteSource {
            path: display.clone(),
            reason: "neither spec.chart.path nor spec.chart.repository is set".to_string(),
        })?;
        let name = chart.name.clone().ok_or_else(|| ManifestError::IncompleteSource {
            path: display.clone(),
            reason: "spec.chart.repository is set but spec.chart.name is missing".to_string(),
        })?;
        let version = chart.version.clone().ok_or_else(|| ManifestError::IncompleteSource {
            path: display.clone(),
            reason: "spec.chart.repository is set but spec.chart.version is missing".to_string(),
        })?;

        Ok(ChartSource::Repository {
            repository,
            name,
            version,
        })
    }
}
