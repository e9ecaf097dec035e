//! Error types for configuration composition.

use std::path::PathBuf;

/// Errors raised while composing a configuration. Any of them aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file source was requested but its directory does not exist.
    #[error("config path {} not found", path.display())]
    PathNotFound { path: PathBuf },

    /// Listing the directory or reading a file failed.
    #[error("failed to read {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file's content is not a structured configuration object.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A requested source name has no registered provider.
    #[error("unknown configuration source '{0}'")]
    UnknownSource(String),
}

impl ConfigError {
    pub(crate) fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::FileSystem { path: path.into(), source }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ConfigError::Parse { path: path.into(), message: message.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::ConfigError;
    use std::path::PathBuf;

    #[test]
    fn path_not_found_message_names_the_path() {
        let err = ConfigError::PathNotFound { path: PathBuf::from("/srv/app/config") };
        assert_eq!(err.to_string(), "config path /srv/app/config not found");
    }

    #[test]
    fn unknown_source_message_names_the_source() {
        let err = ConfigError::UnknownSource("vault".to_string());
        assert!(err.to_string().contains("'vault'"));
    }
}
