use std::path::PathBuf;

/// Failures while loading configuration or TOML content
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Circular inheritance detected at '{0}'")]
    CircularInheritance(String),
    #[error("NPC '{id}' extends unknown parent '{parent}'")]
    UnknownParent { id: String, parent: String },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse { path: path.into(), source }
    }
}
