//! Error types for qrsave operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using qrsave's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrsave operations
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing to encode
    #[error("Payload is empty")]
    EmptyPayload,

    /// Payload does not fit in any QR version at the requested error correction level
    #[error("Payload of {len} bytes exceeds QR capacity at error correction level {ecc}")]
    DataTooLong {
        /// Payload length in bytes
        len: usize,
        /// Error correction level label
        ecc: String,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Read-back of the written artifact produced a different payload
    #[error("Verification failed for {path}: decoded payload does not match input")]
    VerifyMismatch {
        /// Artifact that was decoded
        path: PathBuf,
    },

    /// Destination directory does not exist
    #[error("Output directory does not exist: {0}")]
    OutputDirMissing(PathBuf),

    /// Writing the artifact failed
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Reading an artifact back failed
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Artifact path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Destination extension does not map to a writable image format
    #[error("Unsupported output format for {0}")]
    UnsupportedFormat(PathBuf),

    /// Rendered image would exceed the pixel limit
    #[error("Rendered image would be {side} pixels per side, limit is {max}")]
    ImageTooLarge {
        /// Requested edge length in pixels, saturated at `u64::MAX`
        side: u64,
        /// Largest accepted edge length
        max: u32,
    },

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl Error {
    /// Whether the failure happened before anything touched the filesystem.
    pub fn is_encoding(&self) -> bool {
        matches!(
            self,
            Error::EmptyPayload
                | Error::DataTooLong { .. }
                | Error::QrEncode(_)
                | Error::ImageTooLarge { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_too_long_message() {
        let err = Error::DataTooLong {
            len: 4000,
            ecc: "H".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Payload of 4000 bytes exceeds QR capacity at error correction level H"
        );
        assert!(err.is_encoding());
    }

    #[test]
    fn test_image_too_large_is_encoding() {
        let err = Error::ImageTooLarge {
            side: 2_900_000,
            max: 16_384,
        };
        assert!(err.is_encoding());
        assert_eq!(
            err.to_string(),
            "Rendered image would be 2900000 pixels per side, limit is 16384"
        );
    }

    #[test]
    fn test_filesystem_errors_are_not_encoding() {
        let err = Error::OutputDirMissing(PathBuf::from("/nope"));
        assert!(!err.is_encoding());
        assert_eq!(err.to_string(), "Output directory does not exist: /nope");
    }
}
