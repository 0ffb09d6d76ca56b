use thiserror::Error;

/// Top-level error type for the HelmRelease validator
#[derive(Error, Debug)]
pub enum HrvalError {
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors reading or interpreting the HelmRelease manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("failed to parse manifest {path}: {reason}")]
    Parsing { path: String, reason: String },

    #[error("{path} is not a HelmRelease manifest (kind: {kind})")]
    WrongKind { path: String, kind: String },

    #[error("manifest {path} is missing chart source fields: {reason}")]
    IncompleteSource { path: String, reason: String },
}

/// Errors while fetching the chart from its source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("helm repository operation failed: {0}")]
    Repository(String),

    #[error("git operation failed: {0}")]
    Git(String),

    #[error("fetched chart directory {0} does not exist")]
    MissingChartDir(String),
}

/// Errors while rendering the chart to manifests
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to write values file: {0}")]
    ValuesExtraction(String),

    #[error("helm dependency build failed: {0}")]
    DependencyBuild(String),

    #[error("helm template failed: {0}")]
    Template(String),
}

/// Errors from the schema validation step
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("no schema validator found in PATH (tried 'kubeconform' and 'kubeval')")]
    ValidatorNotFound,

    #[error("schema validation failed with exit code {code}")]
    Failed { code: i32 },
}

/// A required external binary is missing
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("required binary '{0}' not found in PATH")]
    MissingBinary(String),
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    ParsingFailed(String),
}

/// Convenient result type used throughout the crate
pub type Result<T> = std::result::Result<T, HrvalError>;

impl HrvalError {
    /// Process exit code for this error.
    ///
    /// Validation failures propagate the validator's own exit code so CI
    /// pipelines see exactly what the validator reported. Everything else
    /// maps to 1; argument errors are handled by clap before this is reached.
    pub fn exit_code(&self) -> i32 {
        match self {
            HrvalError::Validation(ValidationError::Failed { code }) => *code,
            _ => 1,
        }
    }
}
