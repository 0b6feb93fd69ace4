//! Artifact serialization, persistence and reporting

use crate::error::{Error, Result};
use crate::qr::{ErrorCorrection, QrPayload, QrSymbol};
use image::ImageFormat;
use serde::Serialize;
use serde_json::{Value, json};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

/// Suffix of the sibling file an artifact is written to before being renamed into place.
pub const TEMP_SUFFIX: &str = ".part";

/// File format an artifact is serialized as, chosen from the destination extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raster image handled by the `image` crate
    Raster(ImageFormat),
    /// Vector SVG document
    Svg,
}

impl OutputFormat {
    /// Pick the format for `path` based on its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;

        if ext == "svg" {
            return Ok(Self::Svg);
        }

        ImageFormat::from_extension(&ext)
            .map(Self::Raster)
            .ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))
    }

    /// Short lowercase name used in reports
    pub fn label(&self) -> String {
        match self {
            Self::Svg => "svg".to_string(),
            Self::Raster(format) => format
                .extensions_str()
                .first()
                .copied()
                .unwrap_or("raster")
                .to_string(),
        }
    }

    /// Serialize a symbol into the bytes of a file in this format.
    pub fn serialize(&self, symbol: &QrSymbol) -> Result<Vec<u8>> {
        match self {
            Self::Svg => Ok(symbol.to_svg().into_bytes()),
            Self::Raster(format) => {
                let mut buf = Cursor::new(Vec::new());
                symbol.to_image().write_to(&mut buf, *format)?;
                Ok(buf.into_inner())
            }
        }
    }
}

/// Path of the temporary sibling used while writing `final_path`.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut name = OsString::from(final_path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Write `bytes` to `path`, replacing any existing file.
///
/// The parent directory must already exist. Data lands in a `.part` sibling,
/// is flushed to disk, and only then renamed over `path`.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if !dir.is_dir() {
        return Err(Error::OutputDirMissing(dir.to_path_buf()));
    }

    let temp = temp_path(path);
    let result = write_synced(&temp, bytes).and_then(|()| fs::rename(&temp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&temp);
        return Err(Error::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote artifact");
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    // Data must be durable before the rename publishes it.
    file.sync_all()
}

/// Summary of a generated artifact
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Destination the artifact was written to
    pub path: PathBuf,
    /// Serialized file format
    pub format: String,
    /// QR version
    pub version: i16,
    /// Error correction level
    pub ecc: ErrorCorrection,
    /// Modules per side, excluding the quiet zone
    pub modules: usize,
    /// Edge length of one module in pixels
    pub module_size: u32,
    /// Artifact size in bytes
    pub byte_length: usize,
    /// Encoded payload
    #[serde(skip)]
    pub payload: QrPayload,
    /// Whether the artifact was read back and matched the payload
    pub verified: bool,
}

impl GenerationReport {
    /// The confirmation line printed after a successful write.
    pub fn human(&self) -> String {
        format!("QR code saved to {}", self.path.display())
    }

    /// Structured representation for `--json` output
    pub fn to_json(&self) -> Value {
        json!({
            "path": self.path.display().to_string(),
            "format": self.format,
            "qr": {
                "version": self.version,
                "ecc": self.ecc.label(),
                "modules": self.modules,
                "module_size": self.module_size,
            },
            "payload": {
                "text": self.payload.as_str(),
                "bytes_hex": hex::encode(self.payload.as_bytes()),
                "byte_length": self.payload.len(),
            },
            "byte_length": self.byte_length,
            "verified": self.verified,
        })
    }
}
