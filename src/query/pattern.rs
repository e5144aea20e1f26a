use crate::error::{IndexError, Result};
use crate::index::types::{QueryLimits, NUM_BLOCKS};
use crate::utils::{partition, Blocks};

/// A validated query: owned bytes whose length is a positive multiple of 4
/// within the configured limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    bytes: Vec<u8>,
}

impl Pattern {
    /// Validate raw query bytes against `limits`
    pub fn new(bytes: impl Into<Vec<u8>>, limits: &QueryLimits) -> Result<Self> {
        let bytes = bytes.into();
        let len = bytes.len();

        if len == 0 || len % NUM_BLOCKS != 0 {
            return Err(IndexError::QueryLengthNotMultipleOfFour { len });
        }
        if len < limits.min_len {
            return Err(IndexError::QueryTooShort {
                len,
                min: limits.min_len,
            });
        }
        if len > limits.max_len {
            return Err(IndexError::QueryTooLong {
                len,
                max: limits.max_len,
            });
        }
        Ok(Self { bytes })
    }

    /// Decode a hex string (whitespace ignored) and validate it
    pub fn from_hex(text: &str, limits: &QueryLimits) -> Result<Self> {
        let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = hex::decode(compact).map_err(|e| IndexError::InvalidHex(e.to_string()))?;
        Self::new(bytes, limits)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn block_len(&self) -> usize {
        self.bytes.len() / NUM_BLOCKS
    }

    /// The four blocks of the pattern
    pub fn blocks(&self) -> Blocks<'_> {
        // Length was validated on construction.
        partition(&self.bytes).unwrap_or([&[], &[], &[], &[]])
    }
}

impl AsRef<[u8]> for Pattern {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
