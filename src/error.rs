//! Error types for compactenc codecs

/// Errors that can occur while measuring, encoding or decoding a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A read or write would cross the end of the current region
    OutOfBounds,
    /// A decoded array count exceeds the configured ceiling
    ArrayTooLarge,
    /// A value does not fit its field, or a size computation overflowed
    Overflow,
    /// The state has no buffer suitable for the requested operation
    NoBuffer,
    /// A sign byte was neither 0 nor 1, or an unsigned lexint got a
    /// negative value
    InvalidSign,
    /// Text is not valid in the codec's character encoding
    InvalidText,
    /// An adapted foreign codec rejected its input
    Foreign,
}

impl Error {
    /// Returns a human-readable description of the error
    pub const fn description(&self) -> &'static str {
        match self {
            Error::OutOfBounds => "out of bounds",
            Error::ArrayTooLarge => "array is too big",
            Error::Overflow => "integer overflow in calculations",
            Error::NoBuffer => "state has no buffer for this operation",
            Error::InvalidSign => "invalid lexint sign",
            Error::InvalidText => "invalid text for this encoding",
            Error::Foreign => "foreign codec failed",
        }
    }
}

#[cfg(feature = "std")]
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias for compactenc operations
pub type Result<T> = core::result::Result<T, Error>;
