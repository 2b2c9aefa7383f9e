use crate::color::Color;
use crate::error::{Result, StoreshotError};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// File name of the layout configuration inside the asset root.
pub const CONFIG_FILE_NAME: &str = "overlay_config.json";
/// Directory (under the asset root) receiving `<locale>/<file>` outputs.
pub const EXPORT_DIR_NAME: &str = "export";
/// Locales rendered when none are requested explicitly, in order.
pub const DEFAULT_LOCALES: [&str; 2] = ["fr", "en"];
/// Title point size used when `text.title_size` is absent.
pub const DEFAULT_TITLE_SIZE: u32 = 64;
/// Largest accepted `text.title_size`.
pub const MAX_TITLE_SIZE: u32 = 4096;

/// Output canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

/// Title block settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextConfig {
    /// Nominal font point size; also the per-line vertical advance (plus `line_spacing`).
    #[serde(default = "default_title_size")]
    pub title_size: u32,
    /// Wrap width in pixels.
    pub max_width: f32,
    /// Y of the first line's top edge.
    pub top_padding: f32,
    /// Extra pixels between consecutive lines.
    pub line_spacing: f32,
    pub color: Color,
}

/// Embedded screenshot settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// Bounding box the screenshot is scaled to fit (aspect preserved).
    pub max_width: f32,
    pub max_height: f32,
    /// Y offset of the screenshot's top edge on the canvas; may be negative.
    pub top: f32,
    /// Radius of the rounded-rectangle mask.
    pub corner_radius: f32,
}

/// One configured screenshot and its per-locale titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenEntry {
    /// Screenshot path relative to the asset root; also the output file name.
    pub file: String,
    /// Locale code -> title.
    pub labels: BTreeMap<String, String>,
}

impl ScreenEntry {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            labels: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, locale: impl Into<String>, title: impl Into<String>) -> Self {
        self.labels.insert(locale.into(), title.into());
        self
    }

    /// Title for `locale`; a missing key is an authoring error.
    pub fn label(&self, locale: &str) -> Result<&str> {
        self.labels
            .get(locale)
            .map(String::as_str)
            .ok_or_else(|| StoreshotError::MissingLocale {
                screen: self.file.clone(),
                locale: locale.to_string(),
            })
    }
}

/// Full layout configuration, loaded once per run and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    pub size: CanvasSize,
    pub background: Color,
    pub text: TextConfig,
    pub device: DeviceConfig,
    /// Screens in the order they appear in the JSON object.
    #[serde(
        deserialize_with = "deserialize_screens",
        serialize_with = "serialize_screens"
    )]
    pub screens: Vec<ScreenEntry>,
}

impl OverlayConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: OverlayConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - The canvas or the device bounds are empty
    /// - The title size is zero or above [`MAX_TITLE_SIZE`]
    /// - A distance is negative or not finite (`device.top` and
    ///   `text.line_spacing` may be negative)
    pub fn validate(&self) -> Result<()> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(StoreshotError::InvalidConfig(format!(
                "canvas size must be non-zero, got {}x{}",
                self.size.width, self.size.height
            )));
        }
        if self.text.title_size == 0 || self.text.title_size > MAX_TITLE_SIZE {
            return Err(StoreshotError::InvalidConfig(format!(
                "text.title_size must be in 1..={MAX_TITLE_SIZE}, got {}",
                self.text.title_size
            )));
        }
        if !(self.device.max_width.is_finite() && self.device.max_width > 0.0)
            || !(self.device.max_height.is_finite() && self.device.max_height > 0.0)
        {
            return Err(StoreshotError::InvalidConfig(format!(
                "device bounds must be positive, got {}x{}",
                self.device.max_width, self.device.max_height
            )));
        }
        let non_negative = [
            ("text.max_width", self.text.max_width),
            ("text.top_padding", self.text.top_padding),
            ("device.corner_radius", self.device.corner_radius),
        ];
        for (name, v) in non_negative {
            if !v.is_finite() || v < 0.0 {
                return Err(StoreshotError::InvalidConfig(format!(
                    "{name} must be a finite non-negative number, got {v}"
                )));
            }
        }
        // negative spacing tightens lines; a negative top pushes the screenshot off the top edge
        let signed = [
            ("text.line_spacing", self.text.line_spacing),
            ("device.top", self.device.top),
        ];
        for (name, v) in signed {
            if !v.is_finite() {
                return Err(StoreshotError::InvalidConfig(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Create a fluent builder for `OverlayConfig`.
    pub fn builder() -> OverlayConfigBuilder {
        OverlayConfigBuilder::new()
    }
}

fn default_title_size() -> u32 {
    DEFAULT_TITLE_SIZE
}

fn deserialize_screens<'de, D>(deserializer: D) -> std::result::Result<Vec<ScreenEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScreensVisitor;

    impl<'de> Visitor<'de> for ScreensVisitor {
        type Value = Vec<ScreenEntry>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping screenshot file names to {locale: title} objects")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut screens: Vec<ScreenEntry> = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((file, labels)) = map.next_entry::<String, BTreeMap<String, String>>()? {
                // a repeated key keeps its first position and takes the last value
                match screens.iter_mut().find(|s| s.file == file) {
                    Some(existing) => existing.labels = labels,
                    None => screens.push(ScreenEntry { file, labels }),
                }
            }
            Ok(screens)
        }
    }

    deserializer.deserialize_map(ScreensVisitor)
}

fn serialize_screens<S>(screens: &[ScreenEntry], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(screens.len()))?;
    for s in screens {
        map.serialize_entry(&s.file, &s.labels)?;
    }
    map.end()
}

/// Builder for `OverlayConfig` for ergonomic construction.
///
/// Starts from a portrait 1290x2796 canvas on black with white 64pt titles.
#[derive(Debug, Clone)]
pub struct OverlayConfigBuilder {
    cfg: OverlayConfig,
}

impl Default for OverlayConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: OverlayConfig {
                size: CanvasSize {
                    width: 1290,
                    height: 2796,
                },
                background: Color::BLACK,
                text: TextConfig {
                    title_size: DEFAULT_TITLE_SIZE,
                    max_width: 1100.0,
                    top_padding: 160.0,
                    line_spacing: 12.0,
                    color: Color::WHITE,
                },
                device: DeviceConfig {
                    max_width: 1000.0,
                    max_height: 2200.0,
                    top: 480.0,
                    corner_radius: 60.0,
                },
                screens: Vec::new(),
            },
        }
    }
    pub fn canvas(mut self, width: u32, height: u32) -> Self {
        self.cfg.size = CanvasSize { width, height };
        self
    }
    pub fn background(mut self, c: Color) -> Self {
        self.cfg.background = c;
        self
    }
    pub fn title_size(mut self, v: u32) -> Self {
        self.cfg.text.title_size = v;
        self
    }
    pub fn text_max_width(mut self, v: f32) -> Self {
        self.cfg.text.max_width = v;
        self
    }
    pub fn top_padding(mut self, v: f32) -> Self {
        self.cfg.text.top_padding = v;
        self
    }
    pub fn line_spacing(mut self, v: f32) -> Self {
        self.cfg.text.line_spacing = v;
        self
    }
    pub fn text_color(mut self, c: Color) -> Self {
        self.cfg.text.color = c;
        self
    }
    pub fn device_bounds(mut self, max_width: f32, max_height: f32) -> Self {
        self.cfg.device.max_width = max_width;
        self.cfg.device.max_height = max_height;
        self
    }
    pub fn device_top(mut self, v: f32) -> Self {
        self.cfg.device.top = v;
        self
    }
    pub fn corner_radius(mut self, v: f32) -> Self {
        self.cfg.device.corner_radius = v;
        self
    }
    pub fn screen(mut self, entry: ScreenEntry) -> Self {
        self.cfg.screens.push(entry);
        self
    }
    pub fn build(self) -> OverlayConfig {
        self.cfg
    }
}
