use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{GridError, GridResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Neutral gray used for pivot marker fills.
    pub const NEUTRAL_GRAY: Self = Self::rgb(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    pub fn validate(self) -> GridResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(GridError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Parses a CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` or a common named color.
    pub fn from_css_str(input: &str) -> GridResult<Self> {
        let value = input.trim().to_ascii_lowercase();
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid_color(input));
        }
        if let Some(args) = value
            .strip_prefix("rgba(")
            .or_else(|| value.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_function(args).ok_or_else(|| invalid_color(input));
        }
        named_color(&value).ok_or_else(|| invalid_color(input))
    }
}

/// Accepted wire forms: a CSS color string or explicit channels.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Css(String),
    Channels {
        red: f64,
        green: f64,
        blue: f64,
        #[serde(default = "opaque_alpha")]
        alpha: f64,
    },
}

fn opaque_alpha() -> f64 {
    1.0
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Css(raw) => Self::from_css_str(&raw).map_err(serde::de::Error::custom)?,
            ColorRepr::Channels {
                red,
                green,
                blue,
                alpha,
            } => Self::rgba(red, green, blue, alpha),
        };
        color.validate().map_err(serde::de::Error::custom)?;
        Ok(color)
    }
}

fn invalid_color(input: &str) -> GridError {
    GridError::InvalidData(format!("unrecognized color `{input}`"))
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |index: usize| u8::from_str_radix(&hex[index..=index], 16).ok();
    let byte = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
    match hex.len() {
        3 => Some(Color::rgb8(
            nibble(0)? * 17,
            nibble(1)? * 17,
            nibble(2)? * 17,
        )),
        6 => Some(Color::rgb8(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgb8(byte(0)?, byte(2)?, byte(4)?).with_alpha(f64::from(byte(6)?) / 255.0)),
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let channel = |raw: &str| -> Option<f64> {
        let value: f64 = raw.parse().ok()?;
        (0.0..=255.0).contains(&value).then_some(value / 255.0)
    };
    let alpha = match parts.get(3) {
        Some(raw) => {
            let value: f64 = raw.parse().ok()?;
            if !(0.0..=1.0).contains(&value) {
                return None;
            }
            value
        }
        None => 1.0,
    };
    Some(Color::rgba(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        alpha,
    ))
}

fn named_color(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "magenta" | "fuchsia" => (255, 0, 255),
        "cyan" | "aqua" => (0, 255, 255),
        "gray" | "grey" => (128, 128, 128),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        "transparent" => return Some(Color::rgba(0.0, 0.0, 0.0, 0.0)),
        _ => return None,
    };
    Some(Color::rgb8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::from_css_str("#f00").expect("short hex"), Color::rgb8(255, 0, 0));
        assert_eq!(
            Color::from_css_str("#0080FF").expect("long hex"),
            Color::rgb8(0, 128, 255)
        );
        let translucent = Color::from_css_str("#00000080").expect("hex with alpha");
        assert!((translucent.alpha - 128.0 / 255.0).abs() <= 1e-12);
    }

    #[test]
    fn parses_functional_and_named_forms() {
        let rgba = Color::from_css_str("rgba(255, 0, 0, 0.5)").expect("rgba");
        assert_eq!(rgba, Color::rgb8(255, 0, 0).with_alpha(0.5));
        assert_eq!(Color::from_css_str(" Blue ").expect("named"), Color::rgb8(0, 0, 255));
    }

    #[test]
    fn rejects_unknown_colors() {
        assert!(Color::from_css_str("#12").is_err());
        assert!(Color::from_css_str("rgb(300, 0, 0)").is_err());
        assert!(Color::from_css_str("blurple").is_err());
    }

    #[test]
    fn deserializes_css_strings_and_channel_objects() {
        let css: Color = serde_json::from_str("\"#00ff00\"").expect("css form");
        assert_eq!(css, Color::rgb8(0, 255, 0));
        let channels: Color =
            serde_json::from_str(r#"{"red": 0.1, "green": 0.2, "blue": 0.3}"#).expect("channels");
        assert_eq!(channels, Color::rgb(0.1, 0.2, 0.3));
        assert!(serde_json::from_str::<Color>(r#"{"red": 2.0, "green": 0, "blue": 0}"#).is_err());
    }
}
