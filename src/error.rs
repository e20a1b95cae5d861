use thiserror::Error;

/// Application-level errors using thiserror for structured error handling.
///
/// These errors represent domain-specific failures that can occur during
/// application operation. They provide context and can be chained with anyhow.

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory: {path}")]
    DirectoryCreationFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to open camera {index}")]
    OpenFailed {
        index: i32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Camera {0} not found")]
    CameraNotFound(i32),

    #[error("Failed to read frame from camera")]
    ReadFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Video stream ended")]
    StreamEnded,

    #[error("Unsupported frame layout: {0}")]
    BadFrame(String),
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = ConfigError::Invalid("blend_alpha must be in (0, 1]".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: blend_alpha must be in (0, 1]"
        );

        let err = CaptureError::StreamEnded;
        assert_eq!(err.to_string(), "Video stream ended");

        let err = CaptureError::CameraNotFound(2);
        assert_eq!(err.to_string(), "Camera 2 not found");
    }

    #[test]
    fn test_error_source_chain() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let config_err = ConfigError::LoadFailed {
            path: "/test/config.json".to_string(),
            source: Box::new(io_err),
        };

        assert!(config_err.source().is_some());
        assert_eq!(
            config_err.to_string(),
            "Failed to load configuration from /test/config.json"
        );
    }
}
