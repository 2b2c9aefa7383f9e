use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque RGB color used for the canvas background and title text.
///
/// Accepted in configuration as:
///   - a channel array `[r, g, b]` (a fourth alpha entry is accepted and dropped)
///   - a hex string `"#rgb"` / `"#rrggbb"`
///   - a functional string `"rgb(r, g, b)"`
///   - a CSS color name (`"white"`, `"navy"`, ...), case-insensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl From<Color> for Rgb<u8> {
    fn from(c: Color) -> Self {
        c.to_rgb()
    }
}

impl FromStr for Color {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if let Some(hex) = t.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| format!("invalid hex color: {s}"));
        }
        let lower = t.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(body).ok_or_else(|| format!("invalid rgb() color: {s}"));
        }
        named(&lower).ok_or_else(|| format!("unknown color name: {s}"))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Channels(Vec<u8>),
    Text(String),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;
    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Channels(ch) => match ch.as_slice() {
                [r, g, b] | [r, g, b, _] => Ok(Color::new(*r, *g, *b)),
                other => Err(format!(
                    "color array must have 3 or 4 channels, got {}",
                    other.len()
                )),
            },
            ColorRepr::Text(s) => s.parse(),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut ch = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                ch[i] = v * 17;
            }
            Some(Color::new(ch[0], ch[1], ch[2]))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::new(r, g, b))
        }
        _ => None,
    }
}

fn parse_functional(body: &str) -> Option<Color> {
    let parts: Vec<u8> = body
        .split(',')
        .map(|p| p.trim().parse::<u8>().ok())
        .collect::<Option<Vec<_>>>()?;
    match parts.as_slice() {
        [r, g, b] => Some(Color::new(*r, *g, *b)),
        _ => None,
    }
}

fn named(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "lime" => (0, 255, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "dimgray" | "dimgrey" => (105, 105, 105),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "navy" => (0, 0, 128),
        "olive" => (128, 128, 0),
        "purple" => (128, 0, 128),
        "teal" => (0, 128, 128),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "gold" => (255, 215, 0),
        "indigo" => (75, 0, 130),
        "violet" => (238, 130, 238),
        "brown" => (165, 42, 42),
        "coral" => (255, 127, 80),
        "salmon" => (250, 128, 114),
        "crimson" => (220, 20, 60),
        "turquoise" => (64, 224, 208),
        "midnightblue" => (25, 25, 112),
        "whitesmoke" => (245, 245, 245),
        "ghostwhite" => (248, 248, 255),
        "snow" => (255, 250, 250),
        "ivory" => (255, 255, 240),
        "beige" => (245, 245, 220),
        _ => return None,
    };
    Some(Color::new(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_accepted_form() {
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#0A1b2C".parse::<Color>().unwrap(), Color::new(10, 27, 44));
        assert_eq!("rgb(1, 2, 3)".parse::<Color>().unwrap(), Color::new(1, 2, 3));
        assert_eq!("Navy".parse::<Color>().unwrap(), Color::new(0, 0, 128));
        let c: Color = serde_json::from_str("[12, 34, 56]").unwrap();
        assert_eq!(c, Color::new(12, 34, 56));
        let c: Color = serde_json::from_str("[12, 34, 56, 0]").unwrap();
        assert_eq!(c, Color::new(12, 34, 56));
    }

    #[test]
    fn rejects_malformed() {
        assert!("#ggg".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("notacolor".parse::<Color>().is_err());
        assert!(serde_json::from_str::<Color>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Color>("[1, 2, 300]").is_err());
    }

    #[test]
    fn serializes_as_hex() {
        let s = serde_json::to_string(&Color::new(255, 0, 16)).unwrap();
        assert_eq!(s, "\"#ff0010\"");
    }
}
