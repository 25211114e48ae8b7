use std::io;

#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    #[error("failed to allocate a segment of {requested} bytes")]
    AllocationFailure { requested: usize },

    #[error("destination too small: need {needed} bytes, got {available}")]
    DestinationTooSmall { needed: usize, available: usize },

    #[error("invalid buffer config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BufferError>;

impl From<BufferError> for io::Error {
    fn from(err: BufferError) -> Self {
        let kind = match err {
            BufferError::AllocationFailure { .. } => io::ErrorKind::OutOfMemory,
            BufferError::DestinationTooSmall { .. } => io::ErrorKind::WriteZero,
            BufferError::InvalidConfig(_) | BufferError::Config(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}
