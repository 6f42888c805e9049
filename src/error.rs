use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to open repository at {}. Is it really a git repo?", path.display())]
    RepositoryOpen {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Repository query failed while {action}")]
    RepositoryQuery {
        action: String,
        #[source]
        source: git2::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Failed to read template {}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template {0} not found")]
    TemplateMissing(String),

    #[error("Failed to write report to {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReportError {
    /// Wraps a libgit2 failure with the step that produced it.
    pub fn query(action: impl Into<String>) -> impl FnOnce(git2::Error) -> Self {
        let action = action.into();
        move |source| ReportError::RepositoryQuery { action, source }
    }
}
