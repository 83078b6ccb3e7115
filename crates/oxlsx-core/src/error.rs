//! Error types for the document engine.

use std::path::PathBuf;

use thiserror::Error;

/// The top-level error type for `oxlsx-core`.
#[derive(Error, Debug)]
pub enum Error {
    /// A required part was not found in the package archive.
    #[error("missing part: {0}")]
    MissingPart(PathBuf),

    /// A string does not parse as an `[A-Z]+\d+` cell reference.
    #[error("invalid cell reference: {0}")]
    InvalidCellReference(String),

    /// Malformed XML, or a required attribute/child was absent.
    #[error("invalid XML: {0}")]
    InvalidXml(String),

    /// A semantically invalid part (e.g. an out-of-range style index).
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// An underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An archive-format failure raised by the ZIP layer.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl From<quick_xml::de::DeError> for Error {
    fn from(err: quick_xml::de::DeError) -> Self {
        Error::InvalidXml(err.to_string())
    }
}

impl From<quick_xml::se::SeError> for Error {
    fn from(err: quick_xml::se::SeError) -> Self {
        Error::InvalidXml(err.to_string())
    }
}

/// A convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_part() {
        let err = Error::MissingPart(PathBuf::from("/xl/workbook.xml"));
        assert_eq!(err.to_string(), "missing part: /xl/workbook.xml");
    }

    #[test]
    fn display_invalid_cell_reference() {
        let err = Error::InvalidCellReference("XYZ0".to_string());
        assert_eq!(err.to_string(), "invalid cell reference: XYZ0");
    }

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
