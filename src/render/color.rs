use image::Rgb;
use thiserror::Error;

pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const DEFAULT_TEXT: Rgb<u8> = Rgb([0, 0, 0]);
pub const HIGHLIGHT_RED: Rgb<u8> = Rgb([255, 0, 0]);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("'{0}' is not a #rgb or #rrggbb color")]
    InvalidHex(String),
}

/// Background and text colors for a rendered puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: Rgb<u8>,
    pub text: Rgb<u8>,
    pub highlight: Rgb<u8>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            text: DEFAULT_TEXT,
            highlight: HIGHLIGHT_RED,
        }
    }
}

impl ColorScheme {
    /// Build a scheme from optional hex strings.
    ///
    /// Values that do not start with `#` are ignored in favor of the default;
    /// values that do but fail to parse are an error.
    pub fn from_hex(background: Option<&str>, text: Option<&str>) -> Result<Self, ColorError> {
        let defaults = Self::default();
        Ok(Self {
            background: parse_or_default(background, defaults.background)?,
            text: parse_or_default(text, defaults.text)?,
            highlight: defaults.highlight,
        })
    }
}

fn parse_or_default(value: Option<&str>, default: Rgb<u8>) -> Result<Rgb<u8>, ColorError> {
    match value.map(str::trim) {
        Some(hex) if hex.starts_with('#') => parse_hex_color(hex),
        Some(other) => {
            if !other.is_empty() {
                tracing::warn!("Ignoring color '{}', using default", other);
            }
            Ok(default)
        }
        None => Ok(default),
    }
}

/// Parse `#rrggbb` or `#rgb`
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>, ColorError> {
    let invalid = || ColorError::InvalidHex(value.to_string());
    let digits = value.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
    match digits.len() {
        6 => Ok(Rgb([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ])),
        3 => {
            let expand = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
            Ok(Rgb([expand(0)?, expand(1)?, expand(2)?]))
        }
        _ => Err(invalid()),
    }
}
