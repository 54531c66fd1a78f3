//! Encoded raster image as handed from the identity encoder to the assembler.

/// PNG bytes plus pixel dimensions.
#[derive(Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub png: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

impl RasterImage {
    pub const EXTENSION: &'static str = "png";
    pub const CONTENT_TYPE: &'static str = "image/png";

    pub fn is_square(&self) -> bool { self.width_px == self.height_px }
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("bytes", &self.png.len())
            .field("width_px", &self.width_px)
            .field("height_px", &self.height_px)
            .finish()
    }
}
