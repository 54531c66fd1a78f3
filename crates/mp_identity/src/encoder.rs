//! QR rasterization of identity payloads.
//!
//! Deterministic: the symbol (version, mask) is a pure function of the text
//! and EC level, and the PNG encoder writes no timestamps. Identical payload
//! + params therefore give byte-identical images.

use image::{codecs::png::PngEncoder, ExtendedColorType, GrayImage, ImageEncoder, Luma};
use qrcode::{types::QrError, Color, QrCode};
use thiserror::Error;

use mp_core::{EcLevel, QrParams, RasterImage};

use crate::payload::Payload;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("identity payload of {bytes} bytes exceeds QR capacity at EC level {}", .ec_level.as_str())]
    PayloadTooLarge { bytes: usize, ec_level: EcLevel },

    #[error("qr symbol error: {0}")]
    Qr(String),

    #[error("png encoding error: {0}")]
    Png(String),
}

fn qr_level(l: EcLevel) -> qrcode::EcLevel {
    match l {
        EcLevel::L => qrcode::EcLevel::L,
        EcLevel::M => qrcode::EcLevel::M,
        EcLevel::Q => qrcode::EcLevel::Q,
        EcLevel::H => qrcode::EcLevel::H,
    }
}

/// Encode `payload` as a square greyscale PNG.
pub fn encode(payload: &Payload, params: &QrParams) -> Result<RasterImage, EncodeError> {
    let text = payload.text();
    let code = QrCode::with_error_correction_level(text.as_bytes(), qr_level(params.ec_level)).map_err(|e| match e {
        QrError::DataTooLong => EncodeError::PayloadTooLarge { bytes: text.len(), ec_level: params.ec_level },
        other => EncodeError::Qr(other.to_string()),
    })?;

    let modules = code.width();
    let scale = params.module_px as usize;
    let quiet = params.quiet_zone as usize;
    let side = (modules + 2 * quiet) * scale;
    let side_u32 = u32::try_from(side).map_err(|_| EncodeError::Png(format!("image side {side} px too large")))?;

    let mut img = GrayImage::from_pixel(side_u32, side_u32, Luma([255u8]));
    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let x0 = (i % modules + quiet) * scale;
        let y0 = (i / modules + quiet) * scale;
        for y in y0..y0 + scale {
            for x in x0..x0 + scale {
                img.put_pixel(x as u32, y as u32, Luma([0u8]));
            }
        }
    }

    let mut png = Vec::with_capacity(side * side / 4);
    PngEncoder::new(&mut png)
        .write_image(img.as_raw(), side_u32, side_u32, ExtendedColorType::L8)
        .map_err(|e| EncodeError::Png(e.to_string()))?;

    tracing::debug!(bytes = text.len(), modules, side_px = side, png_bytes = png.len(), "encoded identity image");

    Ok(RasterImage { png, width_px: side_u32, height_px: side_u32 })
}
