//! qrsave - encode a payload as a QR code image and save it to disk
//!
//! # Features
//!
//! - **Encoding**: QR symbols at any error correction level via `qrcode`
//! - **Formats**: PNG, JPEG, BMP, GIF, TIFF and friends via `image`, plus SVG
//! - **Verification**: read-back of written artifacts via `rqrr`
//! - **Safe writes**: artifacts are staged in a `.part` file and renamed into place
//!
//! # Example
//!
//! ```no_run
//! use qrsave::{RenderOptions, generate};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let report = generate(
//!         "https://example.com/file",
//!         Path::new("/tmp/out.png"),
//!         RenderOptions::default(),
//!     )?;
//!     println!("{}", report.human());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, OutputOptions, QrsaveConfig};
pub use output::{GenerationReport, OutputFormat};
pub use qr::{ErrorCorrection, QrDecoder, QrEncoder, QrPayload, QrSymbol, RenderOptions};

use std::fs;
use std::path::Path;

/// Encode `payload` as a QR code and write it to `path`.
///
/// The format follows the extension of `path`. Encoding and serialization
/// finish before the filesystem is touched, so an oversized payload or an
/// unknown extension never leaves a file behind.
pub fn generate(
    payload: impl Into<QrPayload>,
    path: &Path,
    options: RenderOptions,
) -> Result<GenerationReport> {
    let payload = payload.into();
    let format = OutputFormat::from_path(path)?;
    let symbol = QrEncoder::with_options(options).symbol(&payload)?;
    let bytes = format.serialize(&symbol)?;

    output::write_artifact(path, &bytes)?;

    tracing::info!(
        path = %path.display(),
        format = %format.label(),
        version = symbol.version(),
        ecc = %symbol.ecc(),
        bytes = bytes.len(),
        "QR code written"
    );

    Ok(GenerationReport {
        path: path.to_path_buf(),
        format: format.label(),
        version: symbol.version(),
        ecc: symbol.ecc(),
        modules: symbol.modules(),
        module_size: symbol.options().module_size.max(1),
        byte_length: bytes.len(),
        payload,
        verified: false,
    })
}

/// Like [`generate`], then read the artifact back and check it decodes to the payload.
pub fn generate_verified(
    payload: impl Into<QrPayload>,
    path: &Path,
    options: RenderOptions,
) -> Result<GenerationReport> {
    let mut report = generate(payload, path, options)?;
    verify_file(path, &report.payload, options)?;
    report.verified = true;
    Ok(report)
}

/// Decode the artifact at `path` and compare it against `expected`.
///
/// The raster decoder only reads pixels, so an SVG artifact must match the
/// document rendered for `expected` byte for byte, and that symbol must
/// decode back to `expected`.
pub fn verify_file(path: &Path, expected: &QrPayload, options: RenderOptions) -> Result<()> {
    let decoder = QrDecoder::new();
    let decoded = match OutputFormat::from_path(path)? {
        OutputFormat::Raster(_) => decoder.decode_file(path)?,
        OutputFormat::Svg => {
            let symbol = QrEncoder::with_options(options).symbol(expected)?;
            let written = fs::read(path).map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
            if written != symbol.to_svg().as_bytes() {
                tracing::warn!(path = %path.display(), "SVG artifact differs from rendered symbol");
                return Err(Error::VerifyMismatch {
                    path: path.to_path_buf(),
                });
            }
            decoder.decode(&symbol.to_image())?
        }
    };

    if decoded.as_bytes() != expected.as_bytes() {
        tracing::warn!(
            path = %path.display(),
            expected = expected.len(),
            decoded = decoded.len(),
            "Read-back payload mismatch"
        );
        return Err(Error::VerifyMismatch {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), "Artifact verified");
    Ok(())
}
