//! QR code encoding and decoding
//!
//! Encoding turns a payload into a QR symbol and renders it as a raster
//! image, an SVG document, or a terminal preview. Decoding reads a symbol
//! back out of an image and is used to verify written artifacts.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::{QrEncoder, QrSymbol};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pixel edge length of a single module unless configured otherwise.
pub const DEFAULT_MODULE_SIZE: u32 = 10;

/// Largest edge length, in pixels, a symbol may be rendered at.
pub const MAX_IMAGE_SIDE: u32 = 16_384;

/// Width of the quiet zone in modules.
pub const QUIET_ZONE_MODULES: usize = 4;

/// A QR code payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The raw data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Create a new QR payload from a string
    pub fn from_string(s: String) -> Self {
        Self {
            data: s.as_bytes().to_vec(),
            text: Some(s),
        }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload carries no data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<&str> for QrPayload {
    fn from(s: &str) -> Self {
        Self::from_string(s.to_string())
    }
}

impl From<String> for QrPayload {
    fn from(s: String) -> Self {
        Self::from_string(s)
    }
}

impl From<Vec<u8>> for QrPayload {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(data)
    }
}

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% of codewords recoverable
    #[serde(alias = "l", alias = "low")]
    L,
    /// ~15% of codewords recoverable
    #[default]
    #[serde(alias = "m", alias = "medium")]
    M,
    /// ~25% of codewords recoverable
    #[serde(alias = "q", alias = "quartile")]
    Q,
    /// ~30% of codewords recoverable
    #[serde(alias = "h", alias = "high")]
    H,
}

impl ErrorCorrection {
    /// Parse a level name (case-insensitive): `l`/`low`, `m`/`medium`, `q`/`quartile`, `h`/`high`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::L),
            "m" | "medium" => Some(Self::M),
            "q" | "quartile" => Some(Self::Q),
            "h" | "high" => Some(Self::H),
            _ => None,
        }
    }

    /// Single-letter label
    pub fn label(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }

    pub(crate) fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            Self::L => qrcode::EcLevel::L,
            Self::M => qrcode::EcLevel::M,
            Self::Q => qrcode::EcLevel::Q,
            Self::H => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| {
            format!("Unknown error correction level '{value}', expected L, M, Q or H")
        })
    }
}

/// How a QR symbol is turned into pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Error correction level used when encoding
    pub ecc: ErrorCorrection,
    /// Edge length of one module in pixels
    pub module_size: u32,
    /// Surround the symbol with the standard 4-module quiet zone
    pub quiet_zone: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            ecc: ErrorCorrection::M,
            module_size: DEFAULT_MODULE_SIZE,
            quiet_zone: true,
        }
    }
}
