//! Share sheet options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::ShareError;

/// Options for the native share sheet.
///
/// Every field is optional; an unset field leaves the platform default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShareOptions {
    /// Heading of the Android chooser dialog.
    pub dialog_title: Option<String>,
    /// iOS activity types to hide from the activity view.
    #[serde(deserialize_with = "nullable_list")]
    pub excluded_activity_types: Vec<String>,
    /// iOS tint colour of the activity view.
    pub tint_color: Option<TintColor>,
    /// iOS subject used when sharing via e-mail.
    pub subject: Option<String>,
}

impl ShareOptions {
    /// Options with every field unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Android chooser heading.
    #[must_use]
    pub fn with_dialog_title(mut self, title: impl Into<String>) -> Self {
        self.dialog_title = Some(title.into());
        self
    }

    /// Exclude an iOS activity type, e.g. `com.apple.UIKit.activity.Print`.
    #[must_use]
    pub fn exclude_activity_type(mut self, activity_type: impl Into<String>) -> Self {
        self.excluded_activity_types.push(activity_type.into());
        self
    }

    /// Set the iOS tint colour.
    #[must_use]
    pub const fn with_tint_color(mut self, color: TintColor) -> Self {
        self.tint_color = Some(color);
        self
    }

    /// Set the iOS e-mail subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Parse loosely typed options.
    ///
    /// Keys are camelCase (`dialogTitle`, `excludedActivityTypes`, `tintColor`,
    /// `subject`); unknown keys are ignored.
    ///
    /// # Errors
    /// Returns [`ShareError::InvalidArgument`] if the value is not an object or a
    /// recognized key holds a value of the wrong type.
    pub fn from_value(value: &Value) -> Result<Self, ShareError> {
        if !value.is_object() {
            return Err(ShareError::invalid("Options must be a valid object"));
        }
        Self::deserialize(value).map_err(|e| ShareError::invalid(format!("Invalid options: {e}")))
    }
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// An sRGB colour with alpha.
///
/// Parsed from `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
/// `rgba(r, g, b, a)` with `a` in `0..=1`, or a basic CSS colour name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct TintColor {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
    /// Alpha channel, `255` is opaque.
    pub alpha: u8,
}

impl TintColor {
    /// An opaque colour.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::rgba(red, green, blue, 255)
    }

    /// A colour with explicit alpha.
    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Pack as `0xRRGGBBAA`, the layout the native bridges expect.
    #[must_use]
    pub const fn to_rgba_u32(self) -> u32 {
        u32::from_be_bytes([self.red, self.green, self.blue, self.alpha])
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "transparent" => Self::rgba(0, 0, 0, 0),
            "black" => Self::rgb(0, 0, 0),
            "white" => Self::rgb(255, 255, 255),
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "cyan" => Self::rgb(0, 255, 255),
            "magenta" => Self::rgb(255, 0, 255),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "orange" => Self::rgb(255, 165, 0),
            "purple" => Self::rgb(128, 0, 128),
            _ => return None,
        };
        Some(color)
    }

    fn hex(digits: &str) -> Option<Self> {
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|n| n * 17);
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

        match digits.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn functional(args: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return None;
        }

        // `parse` accepts a leading sign and, for floats, exponents and `inf`.
        let unsigned = |s: &str, allow_dot: bool| {
            !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || (allow_dot && b == b'.'))
        };
        let channel = |s: &str| unsigned(s, false).then(|| s.parse::<u8>().ok()).flatten();
        let alpha = if with_alpha {
            if !unsigned(parts[3], true) {
                return None;
            }
            let a: f64 = parts[3].parse().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            (a * 255.0).round() as u8
        } else {
            255
        };

        Some(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }
}

impl FromStr for TintColor {
    type Err = ShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();

        let parsed = if let Some(digits) = normalized.strip_prefix('#') {
            Self::hex(digits)
        } else if let Some(args) = normalized
            .strip_prefix("rgba(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::functional(args, true)
        } else if let Some(args) = normalized
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Self::functional(args, false)
        } else {
            Self::named(&normalized)
        };

        parsed.ok_or_else(|| ShareError::invalid(format!("Invalid tint color: {s:?}")))
    }
}

impl TryFrom<String> for TintColor {
    type Error = ShareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TintColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.red, self.green, self.blue, self.alpha
        )
    }
}
