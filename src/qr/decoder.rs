//! QR code decoder using rqrr

use crate::error::{Error, Result};
use crate::qr::QrPayload;
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// QR code decoder
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Open a raster image file and decode the first QR code in it
    pub fn decode_file(&self, path: &Path) -> Result<QrPayload> {
        let img = image::open(path)?;
        self.decode(&img)
    }

    /// Decode a QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<QrPayload> {
        self.decode_gray(img.to_luma8())
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img);

        let grids = prepared.detect_grids();

        let Some(grid) = grids.first() else {
            return Err(Error::NoQrCodeFound);
        };

        let mut content = Vec::new();
        match grid.decode_to(&mut content) {
            Ok(meta) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );

                Ok(QrPayload::from_bytes(content))
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }

    /// Decode multiple QR codes from an image
    pub fn decode_all(&self, img: &DynamicImage) -> Result<Vec<QrPayload>> {
        let gray = img.to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare(gray);

        let grids = prepared.detect_grids();

        if grids.is_empty() {
            return Err(Error::NoQrCodeFound);
        }

        let mut payloads = Vec::new();

        for grid in grids {
            let mut content = Vec::new();
            match grid.decode_to(&mut content) {
                Ok(_meta) => payloads.push(QrPayload::from_bytes(content)),
                Err(e) => {
                    tracing::warn!("Failed to decode one QR code: {:?}", e);
                }
            }
        }

        if payloads.is_empty() {
            return Err(Error::QrDecode("No QR codes could be decoded".to_string()));
        }

        Ok(payloads)
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}
