//! Renderer boundary and the production QR raster renderer

use super::options::{OutputFormat, RenderOptions};
use crate::error::RenderError;
use crate::models::{BitMatrix, DataUri};
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use qrcode::QrCode;
use std::io::Cursor;

/// Scale used when the requested width cannot fit one pixel per module
const FALLBACK_SCALE: f64 = 4.0;

/// Largest image side the renderer will allocate
pub const MAX_IMAGE_SIDE: u32 = 8192;

/// Turns text into an image data URI
pub trait Renderer {
    /// Render `text` with fully resolved `options`
    fn render(&self, text: &str, options: &RenderOptions) -> Result<String, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for &R {
    fn render(&self, text: &str, options: &RenderOptions) -> Result<String, RenderError> {
        (**self).render(text, options)
    }
}

/// Renders symbols with the `qrcode` encoder and the `image` codecs
#[derive(Debug, Clone, Copy, Default)]
pub struct QrRenderer;

impl QrRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        Self
    }

    /// Encode `text` into its module grid
    pub fn modules(&self, text: &str, options: &RenderOptions) -> Result<BitMatrix, RenderError> {
        let code =
            QrCode::with_error_correction_level(text.as_bytes(), options.error_correction_level.into())
                .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(BitMatrix::from_symbol(&code))
    }

    /// Rasterize `text` into pixels
    pub fn rasterize(&self, text: &str, options: &RenderOptions) -> Result<RgbaImage, RenderError> {
        let dark = parse_hex_color(&options.dark_color)?;
        let light = parse_hex_color(&options.light_color)?;
        let modules = self.modules(text, options)?;
        paint(&modules, options.margin, options.pixel_width, dark, light)
    }
}

impl Renderer for QrRenderer {
    fn render(&self, text: &str, options: &RenderOptions) -> Result<String, RenderError> {
        let pixels = self.rasterize(text, options)?;
        let mut bytes = Vec::new();
        match options.output_format {
            OutputFormat::Png => {
                DynamicImage::ImageRgba8(pixels)
                    .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
            }
            OutputFormat::Jpeg => {
                let quality = (options.quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
                let rgb = DynamicImage::ImageRgba8(pixels).to_rgb8();
                DynamicImage::ImageRgb8(rgb)
                    .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Jpeg(quality))?;
            }
        }
        Ok(DataUri::new(options.output_format.mime(), bytes).encode())
    }
}

/// Pixels per module and image side for a symbol of `size` modules
///
/// Sides above [`MAX_IMAGE_SIDE`] are rejected before anything is allocated.
fn module_scale(size: usize, margin: u32, pixel_width: u32) -> Result<(f64, u32), RenderError> {
    let too_large = || RenderError::Dimensions {
        modules: size,
        margin,
        pixel_width,
    };
    let span = u64::from(margin)
        .checked_mul(2)
        .and_then(|quiet| quiet.checked_add(size as u64))
        .ok_or_else(too_large)?;
    let (scale, side) = if u64::from(pixel_width) >= span {
        (pixel_width as f64 / span as f64, u64::from(pixel_width))
    } else {
        (FALLBACK_SCALE, span.checked_mul(FALLBACK_SCALE as u64).ok_or_else(too_large)?)
    };
    if side > u64::from(MAX_IMAGE_SIDE) {
        return Err(too_large());
    }
    Ok((scale, side as u32))
}

/// Paint the module grid with a quiet zone into a square image
fn paint(
    modules: &BitMatrix,
    margin: u32,
    pixel_width: u32,
    dark: Rgba<u8>,
    light: Rgba<u8>,
) -> Result<RgbaImage, RenderError> {
    let (scale, side) = module_scale(modules.size(), margin, pixel_width)?;
    let quiet = margin as f64 * scale;
    let inner_end = side as f64 - quiet;

    Ok(RgbaImage::from_fn(side, side, |x, y| {
        let (px, py) = (x as f64, y as f64);
        if px < quiet || py < quiet || px >= inner_end || py >= inner_end {
            return light;
        }
        let mx = ((px - quiet) / scale).floor() as usize;
        let my = ((py - quiet) / scale).floor() as usize;
        if modules.get(mx, my) { dark } else { light }
    }))
}

/// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
pub fn parse_hex_color(value: &str) -> Result<Rgba<u8>, RenderError> {
    let invalid = || RenderError::InvalidColor(value.to_string());
    let hex = value.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let expanded: String = match hex.len() {
        3 | 4 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return Err(invalid()),
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
    let alpha = if expanded.len() == 8 { channel(6)? } else { 255 };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ECLevel;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#096dd9").unwrap(), Rgba([0x09, 0x6d, 0xd9, 255]));
        assert_eq!(parse_hex_color("#FFF").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_hex_color("#0000").unwrap(), Rgba([0, 0, 0, 0]));
        assert_eq!(parse_hex_color("11223380").unwrap(), Rgba([0x11, 0x22, 0x33, 0x80]));
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
        assert!(parse_hex_color("blue").is_err());
    }

    #[test]
    fn test_module_scale() {
        // 21 modules + 2 * 2 margin = 25 -> 300 / 25
        assert_eq!(module_scale(21, 2, 300).unwrap(), (12.0, 300));
        // 23 modules do not fit in 10 pixels
        assert_eq!(module_scale(21, 1, 10).unwrap(), (FALLBACK_SCALE, 92));
        assert_eq!(module_scale(21, 0, MAX_IMAGE_SIDE).unwrap().1, MAX_IMAGE_SIDE);
    }

    #[test]
    fn test_module_scale_rejects_oversized_images() {
        assert!(matches!(
            module_scale(21, 1, MAX_IMAGE_SIDE + 1),
            Err(RenderError::Dimensions { .. })
        ));
        assert!(matches!(
            module_scale(21, 1, u32::MAX),
            Err(RenderError::Dimensions { .. })
        ));
        assert!(matches!(
            module_scale(21, u32::MAX, 256),
            Err(RenderError::Dimensions { .. })
        ));
    }

    #[test]
    fn test_render_rejects_huge_width_and_margin() {
        let wide = RenderOptions {
            pixel_width: u32::MAX,
            ..RenderOptions::default()
        };
        let err = QrRenderer::new().render("abc", &wide).unwrap_err();
        assert!(matches!(err, RenderError::Dimensions { .. }));

        let padded = RenderOptions {
            margin: u32::MAX,
            ..RenderOptions::default()
        };
        let err = QrRenderer::new().render("abc", &padded).unwrap_err();
        assert!(matches!(err, RenderError::Dimensions { .. }));
    }

    #[test]
    fn test_rasterize_size_and_quiet_zone() {
        let options = RenderOptions {
            pixel_width: 300,
            margin: 2,
            ..RenderOptions::default()
        };
        let image = QrRenderer::new().rasterize("TRACE-001", &options).unwrap();
        assert_eq!(image.dimensions(), (300, 300));
        // Quiet zone is light, first finder module is dark
        assert_eq!(*image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(*image.get_pixel(24, 24), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_render_png_data_uri() {
        let uri = QrRenderer::new()
            .render("TRACE-001", &RenderOptions::default())
            .unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));
        let parsed = DataUri::parse(&uri).unwrap();
        assert_eq!(&parsed.data[1..4], b"PNG");
    }

    #[test]
    fn test_render_jpeg_data_uri() {
        let options = RenderOptions {
            output_format: OutputFormat::Jpeg,
            ..RenderOptions::default()
        };
        let uri = QrRenderer::new().render("TRACE-001", &options).unwrap();
        let parsed = DataUri::parse(&uri).unwrap();
        assert_eq!(parsed.mime, "image/jpeg");
        assert_eq!(&parsed.data[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_render_rejects_oversized_payload() {
        let options = RenderOptions {
            error_correction_level: ECLevel::H,
            ..RenderOptions::default()
        };
        let text = "x".repeat(1300);
        let err = QrRenderer::new().render(&text, &options).unwrap_err();
        assert!(matches!(err, RenderError::Encode(_)));
    }

    #[test]
    fn test_render_rejects_bad_color() {
        let options = RenderOptions {
            dark_color: "navy".to_string(),
            ..RenderOptions::default()
        };
        let err = QrRenderer::new().render("abc", &options).unwrap_err();
        assert!(matches!(err, RenderError::InvalidColor(_)));
    }
}
