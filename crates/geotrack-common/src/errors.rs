use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("invalid payload: {0}")]
    Payload(String),

    #[error("location unavailable: {0}")]
    Location(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("map.zoom = 40 is out of range [0, 21]".into());
        assert_eq!(
            err.to_string(),
            "config validation error: map.zoom = 40 is out of range [0, 21]"
        );
    }

    #[test]
    fn tracker_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: TrackerError = config_err.into();
        assert!(matches!(err, TrackerError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn tracker_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: TrackerError = io_err.into();
        assert!(matches!(err, TrackerError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn tracker_error_other_variants() {
        let err = TrackerError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = TrackerError::Protocol("unexpected frame".into());
        assert_eq!(err.to_string(), "protocol error: unexpected frame");

        let err = TrackerError::Payload("missing alias".into());
        assert_eq!(err.to_string(), "invalid payload: missing alias");

        let err = TrackerError::Location("permission denied".into());
        assert_eq!(err.to_string(), "location unavailable: permission denied");

        let err = TrackerError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
