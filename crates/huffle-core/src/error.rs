//! Error types for encoding and decoding.

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Codec error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Longest-prefix match attempted without a usable trie.
    #[error("no match possible: {reason}")]
    MatchFailure { reason: &'static str },

    /// Bit stream ran out before the walk reached a leaf.
    #[error("truncated input: symbol {symbol_index} starting at bit {bit_offset} ends inside the trie")]
    TruncatedDecode {
        symbol_index: usize,
        bit_offset: usize,
    },

    /// A symbol of the input has no codeword. Indicates a bug in trie or table construction.
    #[error("internal consistency violation: symbol 0x{symbol:02x} has no codeword")]
    InternalConsistency { symbol: u8 },

    /// Container data is corrupted or structurally invalid.
    #[error("corrupted data: {message}")]
    CorruptedData { message: String },

    /// Unexpected end of input.
    #[error("unexpected EOF after {bits_read} bits")]
    UnexpectedEof { bits_read: usize },

    /// A literal bit pattern contained something other than '0' or '1'.
    #[error("invalid bit pattern: found {found:?} at position {position}")]
    InvalidBitPattern { position: usize, found: char },

    /// A configured or format limit was exceeded.
    #[error("{what} limit exceeded: {actual} > {limit}")]
    LimitExceeded {
        what: &'static str,
        limit: u64,
        actual: u64,
    },

    /// Caller-supplied output buffer cannot hold the result.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// Operation issued in the wrong order.
    #[error("invalid state: expected {expected}, got {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    /// I/O error from an upstream source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Malformed container.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Error::CorruptedData {
            message: message.into(),
        }
    }

    /// Create a corrupted data error with bit offset context.
    pub fn corrupted_at(message: impl Into<String>, bit_offset: usize) -> Self {
        Error::CorruptedData {
            message: format!("{} at bit {}", message.into(), bit_offset),
        }
    }

    /// Input ended after `bits_read` bits.
    pub fn unexpected_eof(bits_read: usize) -> Self {
        Error::UnexpectedEof { bits_read }
    }

    /// Create a limit exceeded error.
    pub fn limit_exceeded(what: &'static str, limit: u64, actual: u64) -> Self {
        Error::LimitExceeded {
            what,
            limit,
            actual,
        }
    }

    /// Output buffer holds `provided` bytes but `required` are needed.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// True when retrying with a bigger buffer or higher limit can succeed.
    ///
    /// Nothing in the codec core is transient, so only caller-side sizing
    /// problems qualify.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::BufferTooSmall { .. } | Error::LimitExceeded { .. }
        )
    }

    /// Check if error reports a bug rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::InternalConsistency { .. })
    }

    /// Stable snake_case label for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Error::MatchFailure { .. } => "match_failure",
            Error::TruncatedDecode { .. } => "truncated_decode",
            Error::InternalConsistency { .. } => "internal_consistency",
            Error::CorruptedData { .. } => "corrupted_data",
            Error::UnexpectedEof { .. } => "unexpected_eof",
            Error::InvalidBitPattern { .. } => "invalid_bit_pattern",
            Error::LimitExceeded { .. } => "limit_exceeded",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::InvalidState { .. } => "invalid_state",
            Error::Io(_) => "io_error",
        }
    }
}
