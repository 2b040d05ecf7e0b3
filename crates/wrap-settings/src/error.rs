use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while persisting or editing the wrapper configuration.
pub enum SettingsError {
    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    /// Serializing the configuration failed.
    Json(#[from] serde_json::Error),

    #[error("no configuration directory available")]
    /// Neither `XDG_CONFIG_HOME` nor a home directory could be resolved.
    NoConfigDir,

    #[error("unknown wrapper tag '{0}'")]
    /// No configured wrapper has this id.
    UnknownTag(String),

    #[error("index {index} out of range for {len} wrapper tags")]
    /// A list position was outside the configured wrappers.
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// Number of configured wrappers.
        len: usize,
    },
}
