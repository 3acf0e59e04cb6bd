//! TraceQR - product traceability QR payloads
//!
//! Encodes a traceability code plus minimal product metadata into a
//! scannable QR image, and recovers that data from scanned text.
//! Decoding never fails: anything that is not a `product_trace` envelope
//! is treated as a bare traceability code.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Environment overrides for render options
pub mod config;
/// Scanned content decoding and validation
pub mod decoder;
/// Host download boundary
pub mod download;
/// Envelope building and image rendering
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (Envelope, DecodedResult, BitMatrix, etc.)
pub mod models;
/// Batch helpers for the CLI
pub mod tools;

pub use decoder::{
    ParsedContent, decode_batch, decode_content, decode_valid, is_valid_qr_content, is_valid_qr_text,
};
pub use download::{DownloadHost, DownloadLink, FsDownloadHost, create_download_link, download_qr_image};
pub use encoder::options::{OutputFormat, RenderOptions, RenderOverrides};
pub use encoder::render::{QrRenderer, Renderer};
pub use encoder::{TraceEncoder, build_envelope, build_product_trace_image, render_qr_image};
pub use error::{DownloadError, QrGenerationError, RenderError};
pub use models::{DecodedResult, ECLevel, Envelope, ProductInfo};
