//! Custom error types for docpath.

use uuid::Uuid;

/// Failures raised by the path engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocError {
    #[error("Path '{path}' not found in document")]
    NotFound { path: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Cannot diff: {side} document root is {found}, expected object")]
    NotAContainer { side: &'static str, found: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not detect file format for {path}")]
    UnknownFormat { path: String },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Unknown output format: {format}")]
    UnknownFormat { format: String },

    #[error("Failed to serialize to JSON: {source}")]
    JsonSerializationError {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize to YAML: {source}")]
    YamlSerializationError {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize to TOML: {source}")]
    TomlSerializationError {
        #[source]
        source: toml::ser::Error,
    },
}

/// Failures raised by the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {id}")]
    DocumentNotFound { id: Uuid },

    #[error("Access denied to document {id}")]
    AccessDenied { id: Uuid },

    #[error("Invalid document type '{value}', expected 'scroll' or 'parchment'")]
    InvalidDocType { value: String },

    #[error("Invalid pagination: {message}")]
    InvalidPagination { message: String },

    #[error(transparent)]
    Path(#[from] DocError),
}

#[derive(Debug, thiserror::Error)]
pub enum DocpathError {
    #[error(transparent)]
    Doc(#[from] DocError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DocError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl ParseError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn json_error(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonError {
            path: path.into(),
            source,
        }
    }

    pub fn yaml_error(path: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::YamlError {
            path: path.into(),
            source,
        }
    }

    pub fn toml_error(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::TomlError {
            path: path.into(),
            source,
        }
    }

    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::UnknownFormat { path: path.into() }
    }
}
