//! Error types shared across the document generation pipeline.

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for document generation
#[derive(Debug)]
pub enum Error {
    /// A schema or `$ref` was requested for a model identity that was never registered
    ModelNotRegistered(String),
    /// An OAuth flow configuration is missing a URL required by its flow type
    InvalidOAuthFlow { flow: String, message: String },
    IoError(std::io::Error),
    SerializationError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::ModelNotRegistered(name) => write!(f, "Model not registered: {}", name),
            Error::InvalidOAuthFlow { flow, message } => {
                write!(f, "Invalid OAuth {} flow: {}", flow, message)
            }
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerializationError(format!("YAML serialization error: {}", err))
    }
}
