use crate::builtin_font::BuiltinFont;
use crate::compositing::blend_pixel;
use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Bold faces tried, in order, for title text.
pub const BOLD_FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/SFProDisplay-Bold.otf",
    "/System/Library/Fonts/SFProDisplay-Semibold.otf",
    "/System/Library/Fonts/SFProText-Semibold.otf",
    "/Library/Fonts/Arial Bold.ttf",
];

/// Regular faces, in order. Not used by the title path.
pub const REGULAR_FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/SFProText-Regular.otf",
    "/System/Library/Fonts/SFProDisplay-Regular.otf",
    "/Library/Fonts/Arial.ttf",
];

/// Width measurement used by the line wrapper.
pub trait TextMeasure {
    /// Rendered advance width of `text` in pixels.
    fn text_width(&self, text: &str) -> f32;
}

/// Where a resolved font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Builtin,
}

enum Face {
    TrueType {
        font: Font<'static>,
        scale: Scale,
        ascent: f32,
    },
    Builtin(BuiltinFont),
}

/// A size-specific font able to measure and draw single lines of text.
pub struct TitleFont {
    size: u32,
    source: FontSource,
    face: Face,
}

impl fmt::Debug for TitleFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TitleFont")
            .field("size", &self.size)
            .field("source", &self.source)
            .finish()
    }
}

impl TitleFont {
    /// The built-in bitmap face at `size`.
    pub fn builtin(size: u32) -> Self {
        Self {
            size,
            source: FontSource::Builtin,
            face: Face::Builtin(BuiltinFont::new(size)),
        }
    }

    /// Wraps a parsed TrueType/OpenType font, sized so one em is `size` pixels.
    pub fn from_font(font: Font<'static>, size: u32, source: FontSource) -> Self {
        let vm = font.v_metrics_unscaled();
        let upem = font.units_per_em().max(1) as f32;
        // rusttype scales by ascent-to-descent height, not by em
        let height = (vm.ascent - vm.descent) / upem * size as f32;
        let scale = Scale::uniform(height);
        let ascent = font.v_metrics(scale).ascent;
        Self {
            size,
            source,
            face: Face::TrueType {
                font,
                scale,
                ascent,
            },
        }
    }

    /// Nominal point size this font was requested at.
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.source, FontSource::Builtin)
    }

    /// Draws one line with its top edge at `y` and left edge at `x`.
    pub fn draw(&self, canvas: &mut RgbImage, x: f32, y: f32, text: &str, color: Rgb<u8>) {
        match &self.face {
            Face::Builtin(b) => b.draw(canvas, x.round() as i64, y.round() as i64, text, color),
            Face::TrueType {
                font,
                scale,
                ascent,
            } => {
                let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
                for glyph in font.layout(text, *scale, point(x, y + ascent)) {
                    let Some(bb) = glyph.pixel_bounding_box() else {
                        continue;
                    };
                    glyph.draw(|gx, gy, v| {
                        let px = gx as i32 + bb.min.x;
                        let py = gy as i32 + bb.min.y;
                        if px < 0 || py < 0 || px >= cw || py >= ch {
                            return;
                        }
                        blend_pixel(canvas.get_pixel_mut(px as u32, py as u32), color, v);
                    });
                }
            }
        }
    }
}

impl TextMeasure for TitleFont {
    fn text_width(&self, text: &str) -> f32 {
        match &self.face {
            Face::Builtin(b) => b.text_width(text),
            Face::TrueType { font, scale, .. } => font
                .layout(text, *scale, point(0.0, 0.0))
                .last()
                .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                .unwrap_or(0.0),
        }
    }
}

fn load_font_file(path: &Path) -> std::io::Result<Option<Font<'static>>> {
    let bytes = std::fs::read(path)?;
    Ok(Font::try_from_vec(bytes))
}

/// Resolve the first usable font among `candidates` at `size`.
///
/// Candidates that do not exist are skipped silently; ones that exist but
/// cannot be read or parsed are skipped with a warning. Falls back to the
/// built-in bitmap face, so this never fails.
pub fn pick_font<P: AsRef<Path>>(candidates: &[P], size: u32) -> TitleFont {
    for candidate in candidates {
        let path = candidate.as_ref();
        if !path.exists() {
            continue;
        }
        match load_font_file(path) {
            Ok(Some(font)) => {
                debug!(?path, size, "resolved font");
                return TitleFont::from_font(font, size, FontSource::File(path.to_path_buf()));
            }
            Ok(None) => warn!(?path, "not a usable font file, trying next candidate"),
            Err(e) => warn!(?path, error = %e, "cannot read font file, trying next candidate"),
        }
    }
    debug!(size, "no candidate font found, using built-in face");
    TitleFont::builtin(size)
}
