use thiserror::Error;

use crate::der::Tag;

/**
    Errors from decoding a receipt payload.

    Every variant carries the absolute byte offset within the top-level
    payload where decoding stopped.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // ── Framing ───────────────────────────────────────────────────────
    #[error("expected {expected} at offset {offset}, found tag 0x{actual:02x}")]
    UnexpectedTag {
        offset: usize,
        expected: Tag,
        actual: u8,
    },
    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("{count} trailing bytes at offset {offset}")]
    TrailingData { offset: usize, count: usize },

    // ── Length ────────────────────────────────────────────────────────
    #[error("indefinite length at offset {offset} is not supported")]
    IndefiniteLength { offset: usize },
    #[error("length at offset {offset} does not fit in usize")]
    LengthOverflow { offset: usize },

    // ── Integer ───────────────────────────────────────────────────────
    #[error("empty INTEGER at offset {offset}")]
    EmptyInteger { offset: usize },
    #[error("INTEGER at offset {offset} is wider than 64 bits")]
    IntegerOverflow { offset: usize },

    // ── Strings ───────────────────────────────────────────────────────
    #[error("unsupported string tag 0x{tag:02x} at offset {offset}")]
    UnsupportedStringTag { offset: usize, tag: u8 },
    #[error("invalid {tag} text at offset {offset}")]
    InvalidText { offset: usize, tag: Tag },

    // ── Nesting ───────────────────────────────────────────────────────
    #[error("nested receipt exceeds maximum depth {max_depth}")]
    NestingTooDeep { max_depth: usize },
}

impl DecodeError {
    /**
        Absolute offset of the failure, if the error is tied to a position.
    */
    pub const fn offset(&self) -> Option<usize> {
        match *self {
            Self::UnexpectedTag { offset, .. }
            | Self::Truncated { offset, .. }
            | Self::TrailingData { offset, .. }
            | Self::IndefiniteLength { offset }
            | Self::LengthOverflow { offset }
            | Self::EmptyInteger { offset }
            | Self::IntegerOverflow { offset }
            | Self::UnsupportedStringTag { offset, .. }
            | Self::InvalidText { offset, .. } => Some(offset),
            Self::NestingTooDeep { .. } => None,
        }
    }

    /**
        Log the error at debug level and hand it back, so call sites can
        write `return Err(DecodeError::... .traced())`.
    */
    pub(crate) fn traced(self) -> Self {
        tracing::debug!(target: "receipt_core::der", offset = ?self.offset(), error = %self, "decode failed");
        self
    }
}

/**
    Type alias for results that may return a [`DecodeError`].
*/
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
