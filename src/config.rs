//! Environment overrides for render options
//!
//! Values are read on every call; nothing is cached, so the effective
//! options always reflect the current environment.

use crate::encoder::options::{OutputFormat, RenderOverrides};
use crate::models::ECLevel;
use std::str::FromStr;

/// Error correction level, `L`/`M`/`Q`/`H`
pub const ENV_ERROR_CORRECTION: &str = "TRACE_QR_ERROR_CORRECTION";
/// Output format, `png` or `jpeg`
pub const ENV_FORMAT: &str = "TRACE_QR_FORMAT";
/// JPEG quality in `0.0..=1.0`
pub const ENV_QUALITY: &str = "TRACE_QR_QUALITY";
/// Quiet zone in modules
pub const ENV_MARGIN: &str = "TRACE_QR_MARGIN";
/// Dark module color
pub const ENV_DARK_COLOR: &str = "TRACE_QR_DARK_COLOR";
/// Light module color
pub const ENV_LIGHT_COLOR: &str = "TRACE_QR_LIGHT_COLOR";
/// Image side in pixels
pub const ENV_WIDTH: &str = "TRACE_QR_WIDTH";

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!(var = name, value = %raw, "ignoring unparsable override");
            None
        }
    }
}

fn string_var<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build overrides from any variable source
pub fn overrides_from_vars<F>(lookup: F) -> RenderOverrides
where
    F: Fn(&str) -> Option<String>,
{
    RenderOverrides {
        error_correction_level: parse_var::<ECLevel, _>(&lookup, ENV_ERROR_CORRECTION),
        output_format: parse_var::<OutputFormat, _>(&lookup, ENV_FORMAT),
        quality: parse_var::<f32, _>(&lookup, ENV_QUALITY),
        margin: parse_var::<u32, _>(&lookup, ENV_MARGIN),
        dark_color: string_var(&lookup, ENV_DARK_COLOR),
        light_color: string_var(&lookup, ENV_LIGHT_COLOR),
        pixel_width: parse_var::<u32, _>(&lookup, ENV_WIDTH),
    }
}

/// Build overrides from the process environment
pub fn overrides_from_env() -> RenderOverrides {
    overrides_from_vars(|name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_environment() {
        assert_eq!(overrides_from_vars(lookup_in(&[])), RenderOverrides::default());
    }

    #[test]
    fn test_all_vars() {
        let overrides = overrides_from_vars(lookup_in(&[
            (ENV_ERROR_CORRECTION, "q"),
            (ENV_FORMAT, "jpeg"),
            (ENV_QUALITY, "0.5"),
            (ENV_MARGIN, " 3 "),
            (ENV_DARK_COLOR, "#112233"),
            (ENV_LIGHT_COLOR, "#eeeeee"),
            (ENV_WIDTH, "512"),
        ]));
        assert_eq!(overrides.error_correction_level, Some(ECLevel::Q));
        assert_eq!(overrides.output_format, Some(OutputFormat::Jpeg));
        assert_eq!(overrides.quality, Some(0.5));
        assert_eq!(overrides.margin, Some(3));
        assert_eq!(overrides.dark_color.as_deref(), Some("#112233"));
        assert_eq!(overrides.light_color.as_deref(), Some("#eeeeee"));
        assert_eq!(overrides.pixel_width, Some(512));
    }

    #[test]
    fn test_unparsable_values_ignored() {
        let overrides = overrides_from_vars(lookup_in(&[
            (ENV_ERROR_CORRECTION, "Z"),
            (ENV_WIDTH, "wide"),
            (ENV_MARGIN, "-1"),
            (ENV_DARK_COLOR, "   "),
        ]));
        assert_eq!(overrides, RenderOverrides::default());
    }
}
