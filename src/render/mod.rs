//! Chart rendering: values extraction + `helm template`.

use crate::common::command_utils::{command_diagnostic, execute_command};
use crate::config::Config;
use crate::error::{RenderError, Result};
use crate::manifest::HelmRelease;
use crate::workspace::Workspace;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Write the manifest's inline `spec.values` to a values file in the
/// workspace. With `ignore_values` (or when the manifest carries none) an
/// empty mapping is written so the chart renders on its defaults.
pub fn extract_values(
    release: &HelmRelease,
    workspace: &Workspace,
    ignore_values: bool,
) -> Result<PathBuf> {
    let values_file = workspace.values_file();

    let content = match (&release.spec.values, ignore_values) {
        (Some(values), false) => serde_yaml::to_string(values)
            .map_err(|e| RenderError::ValuesExtraction(e.to_string()))?,
        _ => "{}\n".to_string(),
    };

    fs::write(&values_file, content)
        .map_err(|e| RenderError::ValuesExtraction(e.to_string()))?;

    Ok(values_file)
}

/// Argument vector for `helm template`, assembled separately so the exact
/// invocation is unit-testable without helm installed.
pub fn template_args(
    release_name: &str,
    chart_dir: &Path,
    namespace: &str,
    values_file: &Path,
) -> Vec<String> {
    vec![
        "template".to_string(),
        release_name.to_string(),
        chart_dir.display().to_string(),
        "--namespace".to_string(),
        namespace.to_string(),
        "--skip-crds".to_string(),
        "-f".to_string(),
        values_file.display().to_string(),
    ]
}

/// Render the chart to a release file in the workspace.
///
/// Git-sourced charts get their dependencies resolved in place first;
/// repository pulls already arrive with dependencies vendored.
pub fn render(
    release: &HelmRelease,
    chart_dir: &Path,
    workspace: &Workspace,
    config: &Config,
    resolve_dependencies: bool,
    ignore_values: bool,
) -> Result<PathBuf> {
    let helm = config.helm_bin();
    let values_file = extract_values(release, workspace, ignore_values)?;

    if resolve_dependencies {
        info!("building chart dependencies");
        let chart = chart_dir.display().to_string();
        let output = execute_command(helm, &["dependency", "build", &chart])?;
        if !output.status.success() {
            return Err(RenderError::DependencyBuild(command_diagnostic(&output)).into());
        }
    }

    let release_name = release.release_name();
    let namespace = release.target_namespace();
    info!("rendering release {} for namespace {}", release_name, namespace);

    let args = template_args(&release_name, chart_dir, namespace, &values_file);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let output = execute_command(helm, &arg_refs)?;
    if !output.status.success() {
        return Err(RenderError::Template(command_diagnostic(&output)).into());
    }

    let release_file = workspace.release_file(&release_name);
    fs::write(&release_file, &output.stdout)?;

    Ok(release_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn repo_release() -> HelmRelease {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"
kind: HelmRelease
metadata:
  name: nginx
  namespace: web
spec:
  chart:
    repository: https://example.com/charts
    name: nginx
    version: 1.2.3
  values:
    replicaCount: 2
    image:
      tag: stable
"#,
        )
        .unwrap();
        HelmRelease::load(file.path()).unwrap()
    }

    #[test]
    fn test_values_extracted_to_workspace() {
        let workspace = Workspace::create().unwrap();
        let release = repo_release();

        let values_file = extract_values(&release, &workspace, false).unwrap();
        let content = fs::read_to_string(&values_file).unwrap();
        assert!(content.contains("replicaCount: 2"));
        assert!(content.contains("tag: stable"));
        fs::remove_dir_all(workspace.root()).unwrap();
    }

    #[test]
    fn test_ignore_values_writes_empty_mapping() {
        let workspace = Workspace::create().unwrap();
        let release = repo_release();

        let values_file = extract_values(&release, &workspace, true).unwrap();
        let content = fs::read_to_string(&values_file).unwrap();
        assert_eq!(content.trim(), "{}");
        fs::remove_dir_all(workspace.root()).unwrap();
    }

    #[test]
    fn test_template_args_are_deterministic() {
        let chart = Path::new("/tmp/work/nginx");
        let values = Path::new("/tmp/work/values.yaml");
        let a = template_args("web-nginx", chart, "web", values);
        let b = template_args("web-nginx", chart, "web", values);
        assert_eq!(a, b);
        assert_eq!(
            a,
            vec![
                "template",
                "web-nginx",
                "/tmp/work/nginx",
                "--namespace",
                "web",
                "--skip-crds",
                "-f",
                "/tmp/work/values.yaml",
            ]
        );
    }
}
