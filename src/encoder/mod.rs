//! Traceability payload encoding
//!
//! This module turns a traceability code into a scannable image:
//! - Envelope construction (the JSON payload carried by the symbol)
//! - Option resolution (fresh defaults merged with caller overrides)
//! - Rendering through a [`Renderer`](render::Renderer)

/// Render options, overrides and output formats
pub mod options;
/// Renderer boundary and the `qrcode`/`image` backed renderer
pub mod render;

use crate::error::QrGenerationError;
use crate::models::{Envelope, ProductInfo};
use chrono::{DateTime, Utc};
use options::{RenderOptions, RenderOverrides, product_trace_overrides};
use render::{QrRenderer, Renderer};

/// Build an envelope for `code`, stamped now
pub fn build_envelope(code: &str, info: Option<&ProductInfo>) -> Envelope {
    build_envelope_at(code, info, Utc::now())
}

/// Build an envelope for `code`, stamped with `at`
pub fn build_envelope_at(code: &str, info: Option<&ProductInfo>, at: DateTime<Utc>) -> Envelope {
    Envelope::new(code, info, at)
}

/// Product trace encoder bound to a renderer
#[derive(Debug, Clone, Default)]
pub struct TraceEncoder<R = QrRenderer> {
    renderer: R,
}

impl TraceEncoder<QrRenderer> {
    /// Create an encoder using [`QrRenderer`]
    pub fn new() -> Self {
        Self {
            renderer: QrRenderer::new(),
        }
    }
}

impl<R: Renderer> TraceEncoder<R> {
    /// Create an encoder over a custom renderer
    pub fn with_renderer(renderer: R) -> Self {
        Self { renderer }
    }

    /// Borrow the underlying renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render arbitrary text with defaults merged per field with `overrides`
    ///
    /// Renderer failures are logged with their cause and surfaced as the
    /// opaque [`QrGenerationError`].
    pub fn render_qr_image(
        &self,
        text: &str,
        overrides: &RenderOverrides,
    ) -> Result<String, QrGenerationError> {
        let options = RenderOptions::merged(overrides);
        self.renderer.render(text, &options).map_err(|err| {
            tracing::error!(
                error = %err,
                text_len = text.len(),
                level = %options.error_correction_level,
                "QR generation failed"
            );
            QrGenerationError
        })
    }

    /// Build the envelope for `code` and render it with the product trace preset
    pub fn build_product_trace_image(
        &self,
        code: &str,
        info: Option<&ProductInfo>,
    ) -> Result<String, QrGenerationError> {
        let envelope = build_envelope(code, info);
        let text = envelope.to_json().map_err(|err| {
            tracing::error!(error = %err, "envelope serialization failed");
            QrGenerationError
        })?;
        tracing::debug!(code = %envelope.code, timestamp = %envelope.timestamp, "rendering product trace");
        self.render_qr_image(&text, &product_trace_overrides())
    }
}

/// Render `text` with [`QrRenderer`]
pub fn render_qr_image(text: &str, overrides: &RenderOverrides) -> Result<String, QrGenerationError> {
    TraceEncoder::new().render_qr_image(text, overrides)
}

/// Build and render a product trace image with [`QrRenderer`]
pub fn build_product_trace_image(
    code: &str,
    info: Option<&ProductInfo>,
) -> Result<String, QrGenerationError> {
    TraceEncoder::new().build_product_trace_image(code, info)
}
