use std::io;

/// Broad classification of a [`BmpError`].
///
/// Useful when a caller only wants to branch on the category of a failure, or
/// needs a fixed human-readable message for it.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    OutOfMemory,
    Io,
    FileNotFound,
    /// Valid BMP, but a depth, compression or header version this crate
    /// doesn't handle.
    UnsupportedVariant,
    /// Structurally broken input: bad magic, truncated data.
    InvalidFile,
    InvalidArgument,
    /// Operation doesn't apply to the image's color mode.
    TypeMismatch,
    LimitExceeded,
}

impl ErrorKind {
    /// Static description of this kind of failure.
    pub const fn description(self) -> &'static str {
        match self {
            Self::OutOfMemory => "Could not allocate enough memory to complete the operation",
            Self::Io => "File input/output error",
            Self::FileNotFound => "File not found",
            Self::UnsupportedVariant => {
                "File is not a supported BMP variant (must be uncompressed 8, 24 or 32 BPP)"
            }
            Self::InvalidFile => "File is not a valid BMP image",
            Self::InvalidArgument => "An argument is invalid or out of range",
            Self::TypeMismatch => "The requested action is not compatible with the BMP's type",
            Self::LimitExceeded => "The image exceeds the configured resource limits",
        }
    }
}

/// Errors from BMP decoding, encoding and pixel access.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpError {
    #[error("could not allocate {bytes} bytes")]
    OutOfMemory { bytes: usize },

    #[error("i/o error: {0}")]
    Io(#[source] io::Error),

    #[error("file not found: {0}")]
    FileNotFound(#[source] io::Error),

    #[error("unsupported BMP variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid BMP file: {0}")]
    InvalidFile(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{operation} is not available for {depth}-bit images")]
    TypeMismatch { operation: &'static str, depth: u16 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl BmpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::Io(_) => ErrorKind::Io,
            Self::FileNotFound(_) => ErrorKind::FileNotFound,
            Self::UnsupportedVariant(_) => ErrorKind::UnsupportedVariant,
            Self::InvalidFile(_) => ErrorKind::InvalidFile,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
        }
    }
}

impl From<io::Error> for BmpError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => BmpError::FileNotFound(e),
            _ => BmpError::Io(e),
        }
    }
}
