use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{op} size mismatch: {lhs} != {rhs}")]
    SizeMismatch {
        op: &'static str,
        lhs: usize,
        rhs: usize,
    },
    #[error("{0} on empty container")]
    EmptyContainer(&'static str),
    #[error("{op}({requested}) overflow: only {available} elements")]
    CountOverflow {
        op: &'static str,
        requested: usize,
        available: usize,
    },
    #[error("index {index} out of bound {len}")]
    IndexOutOfBound { index: usize, len: usize },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO Error: {0}")]
    IOError(String),
}

/// Cause-based classification of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Size mismatch, empty access or count overflow.
    Domain,
    /// Bounds violation or malformed argument.
    InvalidArgument,
    /// Failure of the underlying byte stream.
    Io,
}

impl Error {
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SizeMismatch { .. } | Error::EmptyContainer(_) | Error::CountOverflow { .. } => {
                ErrorKind::Domain
            }
            Error::IndexOutOfBound { .. } | Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::IOError(_) => ErrorKind::Io,
        }
    }

    /// Returns error if two lengths differ.
    #[inline]
    pub fn check_size(op: &'static str, lhs: usize, rhs: usize) -> Result<()> {
        if lhs != rhs {
            return Err(Error::SizeMismatch { op, lhs, rhs });
        }
        Ok(())
    }
}

impl From<std::io::Error> for Error {
    #[inline]
    fn from(src: std::io::Error) -> Self {
        Error::IOError(src.to_string())
    }
}
