use serde::{Deserialize, Serialize};

/// Tool configuration loaded from `.hrval.toml`
///
/// Every field is optional; command-line flags always win over file values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Default Kubernetes schema version when --kube-version is not given
    pub kube_version: Option<String>,

    /// Override for the chart manager binary
    pub helm_bin: Option<String>,

    /// Override for the version-control binary
    pub git_bin: Option<String>,

    /// Override for the schema validator binary
    pub validator_bin: Option<String>,
}

impl Config {
    pub fn kube_version(&self) -> &str {
        self.kube_version.as_deref().unwrap_or("master")
    }

    pub fn helm_bin(&self) -> &str {
        self.helm_bin.as_deref().unwrap_or("helm")
    }

    pub fn git_bin(&self) -> &str {
        self.git_bin.as_deref().unwrap_or("git")
    }

    pub fn validator_bin(&self) -> Option<&str> {
        self.validator_bin.as_deref()
    }
}
