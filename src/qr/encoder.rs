//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::{ErrorCorrection, MAX_IMAGE_SIDE, QUIET_ZONE_MODULES, QrPayload, RenderOptions};
use image::{DynamicImage, Luma};
use qrcode::render::{svg, unicode};
use qrcode::types::QrError;
use qrcode::{QrCode, Version};

/// An encoded QR symbol, ready to be rendered
pub struct QrSymbol {
    code: QrCode,
    options: RenderOptions,
}

impl QrSymbol {
    /// QR version number (1-40)
    pub fn version(&self) -> i16 {
        match self.code.version() {
            Version::Normal(n) | Version::Micro(n) => n,
        }
    }

    /// Number of modules per side, excluding the quiet zone
    pub fn modules(&self) -> usize {
        self.code.width()
    }

    /// Error correction level the symbol was encoded with
    pub fn ecc(&self) -> ErrorCorrection {
        self.options.ecc
    }

    /// Edge length of the rendered raster in pixels, quiet zone included
    pub fn side_pixels(&self) -> u64 {
        let quiet = if self.options.quiet_zone {
            2 * QUIET_ZONE_MODULES
        } else {
            0
        };
        let modules = (self.modules() + quiet) as u64;
        modules
            .checked_mul(u64::from(self.options.module_size.max(1)))
            .unwrap_or(u64::MAX)
    }

    /// Render options carried by this symbol
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Render to an 8-bit grayscale image
    pub fn to_image(&self) -> DynamicImage {
        let size = self.options.module_size.max(1);
        let image = self
            .code
            .render::<Luma<u8>>()
            .quiet_zone(self.options.quiet_zone)
            .module_dimensions(size, size)
            .build();

        DynamicImage::ImageLuma8(image)
    }

    /// Render to an SVG document
    pub fn to_svg(&self) -> String {
        let size = self.options.module_size.max(1);
        self.code
            .render::<svg::Color<'_>>()
            .quiet_zone(self.options.quiet_zone)
            .module_dimensions(size, size)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build()
    }

    /// Render with unicode half blocks for a terminal preview
    pub fn to_terminal(&self) -> String {
        self.code
            .render::<unicode::Dense1x2>()
            .quiet_zone(self.options.quiet_zone)
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build()
    }
}

/// QR code encoder
pub struct QrEncoder {
    options: RenderOptions,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC, 10px modules, quiet zone)
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc: ErrorCorrection) -> Self {
        Self {
            options: RenderOptions {
                ecc,
                ..RenderOptions::default()
            },
        }
    }

    /// Create a new QR encoder with explicit render options
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options this encoder renders with
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Encode a payload into a QR symbol without rendering it
    pub fn symbol(&self, payload: &QrPayload) -> Result<QrSymbol> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }

        let code = QrCode::with_error_correction_level(&payload.data, self.options.ecc.to_qrcode())
            .map_err(|e| match e {
                QrError::DataTooLong => Error::DataTooLong {
                    len: payload.len(),
                    ecc: self.options.ecc.label().to_string(),
                },
                other => Error::QrEncode(format!("Failed to create QR code: {}", other)),
            })?;

        tracing::debug!(
            version = ?code.version(),
            modules = code.width(),
            ecc = %self.options.ecc,
            length = payload.len(),
            "Encoded QR symbol"
        );

        let symbol = QrSymbol {
            code,
            options: self.options,
        };
        let side = symbol.side_pixels();
        if side > u64::from(MAX_IMAGE_SIDE) {
            return Err(Error::ImageTooLarge {
                side,
                max: MAX_IMAGE_SIDE,
            });
        }

        Ok(symbol)
    }

    /// Encode data into a QR code image
    pub fn encode(&self, payload: &QrPayload) -> Result<DynamicImage> {
        Ok(self.symbol(payload)?.to_image())
    }

    /// Encode a string into a QR code image
    pub fn encode_string(&self, data: &str) -> Result<DynamicImage> {
        let payload = QrPayload::from_string(data.to_string());
        self.encode(&payload)
    }

    /// Encode bytes into a QR code image
    pub fn encode_bytes(&self, data: &[u8]) -> Result<DynamicImage> {
        let payload = QrPayload::from_bytes(data.to_vec());
        self.encode(&payload)
    }

    /// Encode a payload into an SVG document
    pub fn render_svg(&self, payload: &QrPayload) -> Result<String> {
        Ok(self.symbol(payload)?.to_svg())
    }

    /// Encode a payload into a unicode preview for terminals
    pub fn render_terminal(&self, payload: &QrPayload) -> Result<String> {
        Ok(self.symbol(payload)?.to_terminal())
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}
