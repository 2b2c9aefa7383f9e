//! Core library for rendering localized app-store screenshots.
//!
//! - Config: `overlay_config.json` describes the canvas, title style, device bounds and per-locale titles
//! - Text: greedy word wrap against a measured font, lines centered horizontally
//! - Device: screenshot scaled to fit (Lanczos3), pasted through a rounded-rectangle mask
//! - Pipeline: `Renderer::render_locale` writes `export/<locale>/<file>` PNGs and reports each screen
//!
//! Quick example:
//! ```ignore
//! use storeshot_core::prelude::*;
//! # fn main() -> anyhow::Result<()> {
//! let renderer = Renderer::from_root("assets/screenshots")?;
//! renderer.render_all(&DEFAULT_LOCALES, |ev| println!("{ev}"))?;
//! # Ok(()) }
//! ```

pub mod builtin_font;
pub mod color;
pub mod compositing;
pub mod config;
pub mod error;
pub mod font;
pub mod layout;
pub mod pipeline;
pub mod wrap;

pub use color::*;
pub use config::*;
pub use error::*;
pub use font::*;
pub use layout::*;
pub use pipeline::*;
pub use wrap::*;

/// Convenience prelude for common types and functions.
/// Importing `storeshot_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::config::{
        CONFIG_FILE_NAME, CanvasSize, DEFAULT_LOCALES, DeviceConfig, EXPORT_DIR_NAME,
        MAX_TITLE_SIZE, OverlayConfig, OverlayConfigBuilder, ScreenEntry, TextConfig,
    };
    pub use crate::font::{BOLD_FONT_CANDIDATES, TextMeasure, TitleFont, pick_font};
    pub use crate::pipeline::{LocaleSummary, RenderEvent, Renderer, output_path, render_canvas};
    pub use crate::wrap::wrap_text;
    pub use crate::{Result, StoreshotError};
}
