use crate::compositing::{paste_masked, rounded_rect_mask};
use crate::config::{CONFIG_FILE_NAME, EXPORT_DIR_NAME, OverlayConfig, ScreenEntry};
use crate::error::{Result, StoreshotError};
use crate::font::{BOLD_FONT_CANDIDATES, TitleFont, pick_font};
use crate::layout::{device_origin, fit_size, title_lines};
use crate::wrap::wrap_text;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, RgbImage};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Per-screen outcome reported while a locale renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// Source screenshot absent; the screen was skipped.
    Missing { path: PathBuf },
    /// Output PNG written.
    Wrote { path: PathBuf },
}

impl fmt::Display for RenderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderEvent::Missing { path } => write!(f, "Missing: {}", path.display()),
            RenderEvent::Wrote { path } => write!(f, "Wrote {}", path.display()),
        }
    }
}

/// What one locale produced.
#[derive(Debug, Clone, Default)]
pub struct LocaleSummary {
    pub locale: String,
    pub written: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

/// `<out_root>/<locale>/<file>`.
pub fn output_path(out_root: &Path, locale: &str, file: &str) -> PathBuf {
    out_root.join(locale).join(file)
}

/// Composes one canvas in memory: background fill, wrapped and centered
/// title, then the scaled screenshot pasted through a rounded mask.
///
/// A screenshot with a zero-sized side is not pasted.
pub fn render_canvas(
    cfg: &OverlayConfig,
    font: &TitleFont,
    title: &str,
    screenshot: &DynamicImage,
) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(cfg.size.width, cfg.size.height, cfg.background.to_rgb());

    let lines = wrap_text(title, font, cfg.text.max_width);
    let text_color = cfg.text.color.to_rgb();
    for line in title_lines(
        &lines,
        font,
        cfg.size.width,
        cfg.text.top_padding,
        font.size(),
        cfg.text.line_spacing,
    ) {
        font.draw(&mut canvas, line.x, line.y, &line.text, text_color);
    }

    let shot = screenshot.to_rgb8();
    let (sw, sh) = shot.dimensions();
    if sw == 0 || sh == 0 {
        return canvas;
    }
    let (nw, nh) = fit_size(sw, sh, cfg.device.max_width, cfg.device.max_height);
    let resized = imageops::resize(&shot, nw, nh, FilterType::Lanczos3);
    let mask = rounded_rect_mask(nw, nh, cfg.device.corner_radius);
    let (x, y) = device_origin(cfg.size.width, nw, cfg.device.top);
    debug!(
        src = ?(sw, sh),
        dst = ?(nw, nh),
        x,
        y,
        lines = lines.len(),
        "composed screen"
    );
    paste_masked(&mut canvas, &resized, &mask, x, y);
    canvas
}

/// Renders every configured screen for one or more locales.
///
/// Holds the read-only inputs of a run: asset root, output root,
/// configuration and the resolved title font.
#[derive(Debug)]
pub struct Renderer {
    root: PathBuf,
    out_root: PathBuf,
    config: OverlayConfig,
    font: TitleFont,
}

impl Renderer {
    /// Outputs go to `<root>/export` unless overridden with [`Renderer::with_out_root`].
    pub fn new(root: impl Into<PathBuf>, config: OverlayConfig, font: TitleFont) -> Self {
        let root = root.into();
        let out_root = root.join(EXPORT_DIR_NAME);
        Self {
            root,
            out_root,
            config,
            font,
        }
    }

    /// Loads `<root>/overlay_config.json` and resolves the bold title font.
    pub fn from_root(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = OverlayConfig::load(&root.join(CONFIG_FILE_NAME))?;
        let font = pick_font(BOLD_FONT_CANDIDATES, config.text.title_size);
        Ok(Self::new(root, config, font))
    }

    pub fn with_out_root(mut self, out_root: impl Into<PathBuf>) -> Self {
        self.out_root = out_root.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn out_root(&self) -> &Path {
        &self.out_root
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn font(&self) -> &TitleFont {
        &self.font
    }

    /// Renders every screen for `locale`, in configuration order.
    ///
    /// - A missing screenshot emits [`RenderEvent::Missing`] and is skipped.
    /// - A screen without a title for `locale` aborts with `MissingLocale`.
    /// - Decode and write failures abort; files written earlier stay on disk.
    #[instrument(skip_all, fields(locale = %locale))]
    pub fn render_locale<F>(&self, locale: &str, mut on_event: F) -> Result<LocaleSummary>
    where
        F: FnMut(&RenderEvent),
    {
        let out_dir = self.out_root.join(locale);
        fs::create_dir_all(&out_dir)?;

        let mut summary = LocaleSummary {
            locale: locale.to_string(),
            ..Default::default()
        };
        for screen in &self.config.screens {
            let src = self.root.join(&screen.file);
            if !src.exists() {
                warn!(path = ?src, "screenshot missing, skipping");
                on_event(&RenderEvent::Missing { path: src.clone() });
                summary.missing.push(src);
                continue;
            }
            let out_path = self.render_screen(screen, locale, &src)?;
            info!(path = ?out_path, "screen written");
            on_event(&RenderEvent::Wrote {
                path: out_path.clone(),
            });
            summary.written.push(out_path);
        }
        info!(
            written = summary.written.len(),
            missing = summary.missing.len(),
            "locale done"
        );
        Ok(summary)
    }

    /// Runs [`Renderer::render_locale`] for each locale in order, stopping at the first error.
    pub fn render_all<S, F>(&self, locales: &[S], mut on_event: F) -> Result<Vec<LocaleSummary>>
    where
        S: AsRef<str>,
        F: FnMut(&RenderEvent),
    {
        let mut out = Vec::with_capacity(locales.len());
        for locale in locales {
            out.push(self.render_locale(locale.as_ref(), &mut on_event)?);
        }
        Ok(out)
    }

    fn render_screen(&self, screen: &ScreenEntry, locale: &str, src: &Path) -> Result<PathBuf> {
        let title = screen.label(locale)?;
        let shot = ImageReader::open(src)?.with_guessed_format()?.decode()?;
        if shot.width() == 0 || shot.height() == 0 {
            return Err(StoreshotError::EmptyScreenshot {
                path: src.to_path_buf(),
            });
        }
        let canvas = render_canvas(&self.config, &self.font, title, &shot);
        let out_path = output_path(&self.out_root, locale, &screen.file);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        canvas.save_with_format(&out_path, ImageFormat::Png)?;
        Ok(out_path)
    }
}
