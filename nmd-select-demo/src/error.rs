use nmd_select::ConfigError;

/// Errors that stop the demo before or while it runs.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid options file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Config(#[from] ConfigError),
}
