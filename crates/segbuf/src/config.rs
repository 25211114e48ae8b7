use serde::Deserialize;

use crate::{BufferError, Result};

/// Allocation granularity of a fresh segment, in bytes.
///
/// A segment is never smaller than this; a single append larger than it gets
/// a segment sized to the append instead.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Tunables for a [`SegmentedBuffer`](crate::SegmentedBuffer).
///
/// # Examples
///
/// ```
/// use segbuf::BufferConfig;
///
/// let config = BufferConfig::from_toml_str("chunk_size = 16384").unwrap();
/// assert_eq!(config.chunk_size, 16384);
///
/// let config = BufferConfig::default().chunk_size(1024);
/// assert_eq!(config.chunk_size, 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Minimum capacity of every newly allocated segment.
    ///
    /// Default: [`DEFAULT_CHUNK_SIZE`]
    pub chunk_size: usize,
}

impl Default for BufferConfig {
    fn default() -> Self { Self::new() }
}

impl BufferConfig {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    #[must_use]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Parse and validate a config from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(BufferError::InvalidConfig(
                "chunk_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chunk_size() {
        assert_eq!(BufferConfig::default().chunk_size, 4096);
        assert!(BufferConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_toml_empty_uses_defaults() {
        let config = BufferConfig::from_toml_str("").unwrap();
        assert_eq!(config, BufferConfig::default());
    }

    #[test]
    fn test_from_toml_overrides_chunk_size() {
        let config = BufferConfig::from_toml_str("chunk_size = 512").unwrap();
        assert_eq!(config.chunk_size, 512);
    }

    #[test]
    fn test_from_toml_rejects_zero() {
        let result = BufferConfig::from_toml_str("chunk_size = 0");
        assert!(matches!(result, Err(BufferError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_toml_rejects_wrong_type() {
        let result = BufferConfig::from_toml_str("chunk_size = \"big\"");
        assert!(matches!(result, Err(BufferError::Config(_))));
    }
}
