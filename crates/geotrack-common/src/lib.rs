pub mod errors;

pub use errors::{ConfigError, TrackerError};

pub type Result<T> = std::result::Result<T, TrackerError>;
