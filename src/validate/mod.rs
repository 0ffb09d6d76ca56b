//! Strict schema validation of the rendered release.

use crate::common::command_utils::execute_command_passthrough;
use crate::error::{Result, ValidationError};
use crate::tools::{Dialect, Validator};
use log::info;
use std::path::Path;

/// Argument vector for the validator, assembled separately so the exact
/// invocation is unit-testable without the validator installed.
///
/// kubeconform does not accept "master" as a version string; omitting the
/// flag targets its latest schemas, which is what "master" means. kubeval
/// accepts "master" directly.
pub fn validator_args(validator: &Validator, kube_version: &str, release_file: &Path) -> Vec<String> {
    let mut args = match validator.dialect() {
        Dialect::Kubeval => vec![
            "--strict".to_string(),
            "--ignore-missing-schemas".to_string(),
            "--kubernetes-version".to_string(),
            kube_version.to_string(),
        ],
        Dialect::Kubeconform => {
            let mut args = vec![
                "-strict".to_string(),
                "-ignore-missing-schemas".to_string(),
                "-summary".to_string(),
            ];
            if kube_version != "master" {
                args.push("-kubernetes-version".to_string());
                args.push(kube_version.to_string());
            }
            args
        }
    };
    args.push(release_file.display().to_string());
    args
}

/// Run the validator against the rendered release file.
///
/// The validator's report is passed through to the terminal; a non-zero
/// exit code surfaces as `ValidationError::Failed` so the process can
/// propagate it unchanged.
pub fn validate(validator: &Validator, kube_version: &str, release_file: &Path) -> Result<()> {
    info!(
        "validating {} against Kubernetes {}",
        release_file.display(),
        kube_version
    );

    let args = validator_args(validator, kube_version, release_file);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let code = execute_command_passthrough(validator.binary(), &arg_refs)?;

    if code != 0 {
        return Err(ValidationError::Failed { code }.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kubeconform_args_skip_version_flag_for_master() {
        let args = validator_args(&Validator::new("kubeconform"), "master", Path::new("r.yaml"));
        assert!(!args.iter().any(|a| a == "-kubernetes-version"));
        assert!(args.contains(&"-strict".to_string()));
        assert_eq!(args.last().unwrap(), "r.yaml");
    }

    #[test]
    fn test_kubeconform_args_carry_explicit_version() {
        let args = validator_args(&Validator::new("kubeconform"), "1.18.0", Path::new("r.yaml"));
        let pos = args.iter().position(|a| a == "-kubernetes-version").unwrap();
        assert_eq!(args[pos + 1], "1.18.0");
    }

    #[test]
    fn test_kubeval_args_use_double_dash_flags() {
        let args = validator_args(&Validator::new("kubeval"), "1.18.0", Path::new("r.yaml"));
        assert!(args.contains(&"--strict".to_string()));
        assert!(args.contains(&"--ignore-missing-schemas".to_string()));
        assert!(!args.iter().any(|a| a == "-summary"));
        let pos = args.iter().position(|a| a == "--kubernetes-version").unwrap();
        assert_eq!(args[pos + 1], "1.18.0");
    }

    #[test]
    fn test_configured_kubeval_path_keeps_kubeval_flags() {
        // validator-bin = "/usr/local/bin/kubeval" must not get kubeconform flags
        let validator = Validator::new("/usr/local/bin/kubeval");
        let args = validator_args(&validator, "master", Path::new("r.yaml"));
        assert!(args.contains(&"--strict".to_string()));
        assert!(!args.contains(&"-strict".to_string()));
    }

    #[test]
    fn test_unknown_validator_uses_kubeconform_flags() {
        let validator = Validator::new("my-validator");
        let args = validator_args(&validator, "master", Path::new("r.yaml"));
        assert!(args.contains(&"-strict".to_string()));
        assert_eq!(validator.binary(), "my-validator");
    }
}
