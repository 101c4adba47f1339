use core::fmt;

/// A parsing error for any of the wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The octet sequence is shorter than the format requires.
    Truncated,
    /// A field contains a value that contradicts the format itself,
    /// such as a length field pointing outside the buffer.
    Malformed,
}

/// The result type for wire parsing operations.
pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Truncated => write!(f, "truncated packet"),
            Error::Malformed => write!(f, "malformed packet"),
        }
    }
}
