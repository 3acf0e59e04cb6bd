use crate::models::ECLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image container produced by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Lossless PNG
    #[serde(rename = "image/png", alias = "png")]
    Png,
    /// JPEG, encoded at [`RenderOptions::quality`]
    #[serde(rename = "image/jpeg", alias = "jpeg", alias = "jpg")]
    Jpeg,
}

impl OutputFormat {
    /// MIME type placed in the data URI
    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" | "image/jpeg" => Ok(OutputFormat::Jpeg),
            other => Err(format!("unsupported output format {other:?}")),
        }
    }
}

/// Effective presentation options handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Symbol redundancy
    pub error_correction_level: ECLevel,
    /// Image container
    pub output_format: OutputFormat,
    /// JPEG quality in `0.0..=1.0`
    pub quality: f32,
    /// Quiet zone width in modules
    pub margin: u32,
    /// Dark module color, hex
    pub dark_color: String,
    /// Light module and quiet zone color, hex
    pub light_color: String,
    /// Requested image side in pixels
    pub pixel_width: u32,
}

impl Default for RenderOptions {
    /// Fresh record on every call
    fn default() -> Self {
        Self {
            error_correction_level: ECLevel::H,
            output_format: OutputFormat::Png,
            quality: 0.92,
            margin: 1,
            dark_color: "#000000".to_string(),
            light_color: "#FFFFFF".to_string(),
            pixel_width: 256,
        }
    }
}

impl RenderOptions {
    /// Defaults with `overrides` applied field by field
    pub fn merged(overrides: &RenderOverrides) -> Self {
        let mut options = Self::default();
        options.apply(overrides);
        options
    }

    /// Replace every field the overrides set, leave the rest
    pub fn apply(&mut self, overrides: &RenderOverrides) {
        if let Some(level) = overrides.error_correction_level {
            self.error_correction_level = level;
        }
        if let Some(format) = overrides.output_format {
            self.output_format = format;
        }
        if let Some(quality) = overrides.quality {
            self.quality = quality;
        }
        if let Some(margin) = overrides.margin {
            self.margin = margin;
        }
        if let Some(dark) = &overrides.dark_color {
            self.dark_color = dark.clone();
        }
        if let Some(light) = &overrides.light_color {
            self.light_color = light.clone();
        }
        if let Some(width) = overrides.pixel_width {
            self.pixel_width = width;
        }
    }
}

/// Caller-supplied option fields; `None` keeps the default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOverrides {
    /// Symbol redundancy
    pub error_correction_level: Option<ECLevel>,
    /// Image container
    pub output_format: Option<OutputFormat>,
    /// JPEG quality
    pub quality: Option<f32>,
    /// Quiet zone width in modules
    pub margin: Option<u32>,
    /// Dark module color
    pub dark_color: Option<String>,
    /// Light module color
    pub light_color: Option<String>,
    /// Image side in pixels
    pub pixel_width: Option<u32>,
}

impl RenderOverrides {
    /// Stack `over` on top of `self`; fields set in `over` win
    pub fn layer(self, over: RenderOverrides) -> Self {
        Self {
            error_correction_level: over.error_correction_level.or(self.error_correction_level),
            output_format: over.output_format.or(self.output_format),
            quality: over.quality.or(self.quality),
            margin: over.margin.or(self.margin),
            dark_color: over.dark_color.or(self.dark_color),
            light_color: over.light_color.or(self.light_color),
            pixel_width: over.pixel_width.or(self.pixel_width),
        }
    }
}

/// Fixed presentation used for product trace images
pub(crate) fn product_trace_overrides() -> RenderOverrides {
    RenderOverrides {
        pixel_width: Some(300),
        margin: Some(2),
        dark_color: Some("#096dd9".to_string()),
        light_color: Some("#ffffff".to_string()),
        ..RenderOverrides::default()
    }
}
