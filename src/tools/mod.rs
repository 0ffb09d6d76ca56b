//! Pre-flight detection of the external binaries the pipeline drives.

use crate::common::command_utils::is_command_available;
use crate::config::Config;
use crate::error::{Result, ToolError, ValidationError};
use log::debug;
use std::path::Path;
use std::process::Command;

/// Flag dialect a validator binary speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Kubeconform,
    Kubeval,
}

/// Schema validator to invoke: the binary plus the flag dialect it speaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validator {
    bin: String,
    dialect: Dialect,
}

impl Validator {
    /// The dialect follows the binary's basename, so `validator-bin =
    /// "kubeval"` (or a path ending in it) gets kubeval's double-dash
    /// flags. Unknown names are driven with the kubeconform dialect.
    pub fn new(bin: &str) -> Self {
        let basename = Path::new(bin)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(bin);
        let dialect = if basename == "kubeval" {
            Dialect::Kubeval
        } else {
            Dialect::Kubeconform
        };
        Validator {
            bin: bin.to_string(),
            dialect,
        }
    }

    pub fn binary(&self) -> &str {
        &self.bin
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

/// Verify every required binary before any work begins.
///
/// Returns the validator to use. Missing chart manager or git is fatal;
/// so is the absence of both validators. helm has no `--version` flag, so
/// it gets a `version --short` probe instead.
pub fn check_dependencies(config: &Config) -> Result<Validator> {
    let probes = [
        (config.helm_bin(), vec!["version", "--short"]),
        (config.git_bin(), vec!["--version"]),
    ];
    for (bin, args) in probes {
        let available = Command::new(bin)
            .args(&args)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if !available {
            return Err(ToolError::MissingBinary(bin.to_string()).into());
        }
        debug!("found required binary: {}", bin);
    }

    let validator = detect_validator(config)?;
    debug!("using schema validator: {}", validator.binary());
    Ok(validator)
}

/// Pick the schema validator: configured binary first, then kubeconform,
/// then kubeval.
pub fn detect_validator(config: &Config) -> Result<Validator> {
    if let Some(bin) = config.validator_bin() {
        if is_validator_available(bin) {
            return Ok(Validator::new(bin));
        }
        return Err(ToolError::MissingBinary(bin.to_string()).into());
    }

    if is_validator_available("kubeconform") {
        return Ok(Validator::new("kubeconform"));
    }
    if is_validator_available("kubeval") {
        return Ok(Validator::new("kubeval"));
    }

    Err(ValidationError::ValidatorNotFound.into())
}

/// kubeconform exits non-zero for `--version` on some releases, so probe
/// with `-v` and fall back to a plain spawn check.
fn is_validator_available(bin: &str) -> bool {
    Command::new(bin)
        .arg("-v")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
        || is_command_available(bin)
}

/// Get the chart manager version if available (for --debug diagnostics)
pub fn helm_version(config: &Config) -> Option<String> {
    Command::new(config.helm_bin())
        .arg("version")
        .arg("--short")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kubeval_basename_selects_kubeval_dialect() {
        assert_eq!(Validator::new("kubeval").dialect(), Dialect::Kubeval);
        assert_eq!(
            Validator::new("/usr/local/bin/kubeval").dialect(),
            Dialect::Kubeval
        );
    }

    #[test]
    fn test_other_binaries_get_kubeconform_dialect() {
        assert_eq!(Validator::new("kubeconform").dialect(), Dialect::Kubeconform);
        assert_eq!(Validator::new("my-validator").dialect(), Dialect::Kubeconform);
    }

    #[test]
    fn test_configured_path_is_kept_as_binary() {
        let validator = Validator::new("/usr/local/bin/kubeval");
        assert_eq!(validator.binary(), "/usr/local/bin/kubeval");
    }

    #[test]
    fn test_missing_configured_validator_is_fatal() {
        let config = Config {
            validator_bin: Some("definitely-not-a-validator-9c1d".to_string()),
            ..Config::default()
        };
        let err = detect_validator(&config).unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-validator-9c1d"));
    }

    #[test]
    fn test_missing_helm_reported_by_name() {
        let config = Config {
            helm_bin: Some("definitely-not-helm-4b2a".to_string()),
            ..Config::default()
        };
        let err = check_dependencies(&config).unwrap_err();
        assert!(err.to_string().contains("definitely-not-helm-4b2a"));
    }
}
