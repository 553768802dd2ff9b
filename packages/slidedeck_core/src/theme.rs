//! Theme model and resolution.
//!
//! A [`Theme`] is a partial set of hex color overrides. [`resolve_theme`]
//! turns the slide/deck pair into a [`ResolvedTheme`] with every slot filled.

use crate::decode::object;
use crate::error::SchemaResult;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Color overrides for a deck or a single slide
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Optional theme name for reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Background color as hex string (e.g. "#1a1a1a")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_hex: Option<String>,
    /// Title text color as hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_color_hex: Option<String>,
    /// Subtitle text color as hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_color_hex: Option<String>,
    /// Body text color as hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_color_hex: Option<String>,
    /// Code text color as hex string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_color_hex: Option<String>,
}

impl Theme {
    /// Strict decode: any field with the wrong type fails.
    pub fn from_value(value: &Value) -> SchemaResult<Self> {
        object(value, "theme")?;
        Ok(Theme::deserialize(value)?)
    }

    /// Every color field with its wire name, in slot order.
    pub fn color_fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("backgroundHex", self.background_hex.as_deref()),
            ("titleColorHex", self.title_color_hex.as_deref()),
            ("subtitleColorHex", self.subtitle_color_hex.as_deref()),
            ("bodyColorHex", self.body_color_hex.as_deref()),
            ("codeColorHex", self.code_color_hex.as_deref()),
        ]
    }
}

/// An RGB color with opacity, each component in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Rgba {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    pub const fn with_alpha(self, alpha: f64) -> Self {
        Rgba { alpha, ..self }
    }

    /// Parse `#rgb`, `rgb`, `#rrggbb` or `rrggbb`. Anything else is `None`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return None,
        };
        let value = u32::from_str_radix(&expanded, 16).ok()?;
        let channel = |shift: u32| f64::from((value >> shift) & 0xff) / 255.0;
        Some(Rgba::rgb(channel(16), channel(8), channel(0)))
    }

    /// `#rrggbb` rendering, ignoring alpha.
    pub fn to_hex(&self) -> String {
        let byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.red), byte(self.green), byte(self.blue))
    }
}

/// Parse a hex color string. Invalid input yields `None`, never an error.
pub fn parse_hex(hex: &str) -> Option<Rgba> {
    Rgba::from_hex(hex)
}

/// One themable color slot with its built-in defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Background,
    Title,
    Subtitle,
    Body,
    Code,
}

impl Slot {
    pub const ALL: [Slot; 5] = [Slot::Background, Slot::Title, Slot::Subtitle, Slot::Body, Slot::Code];

    /// Hex used when the theme leaves this slot unset.
    pub fn default_hex(self) -> &'static str {
        match self {
            Slot::Background => "#1a1a1a",
            Slot::Title | Slot::Subtitle | Slot::Code => "#ffffff",
            Slot::Body => "#e0e0e0",
        }
    }

    /// Color used when the theme sets this slot to something unparsable.
    pub fn fallback(self) -> Rgba {
        match self {
            Slot::Background => Rgba::BLACK.with_alpha(0.96),
            Slot::Subtitle => Rgba::WHITE.with_alpha(0.85),
            Slot::Title | Slot::Body | Slot::Code => Rgba::WHITE,
        }
    }

    fn hex_in(self, theme: &Theme) -> Option<&str> {
        match self {
            Slot::Background => theme.background_hex.as_deref(),
            Slot::Title => theme.title_color_hex.as_deref(),
            Slot::Subtitle => theme.subtitle_color_hex.as_deref(),
            Slot::Body => theme.body_color_hex.as_deref(),
            Slot::Code => theme.code_color_hex.as_deref(),
        }
    }

    fn resolve(self, theme: Option<&Theme>) -> Rgba {
        let hex = theme.and_then(|t| self.hex_in(t)).unwrap_or(self.default_hex());
        parse_hex(hex).unwrap_or_else(|| {
            tracing::debug!(slot = ?self, hex, "unparsable theme color, using fallback");
            self.fallback()
        })
    }
}

/// Fully populated theme handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, JsonSchema)]
pub struct ResolvedTheme {
    pub background: Rgba,
    pub title: Rgba,
    pub subtitle: Rgba,
    pub body: Rgba,
    pub code: Rgba,
}

impl ResolvedTheme {
    /// Fill every slot from `theme`, falling back per slot.
    pub fn from_theme(theme: Option<&Theme>) -> Self {
        ResolvedTheme {
            background: Slot::Background.resolve(theme),
            title: Slot::Title.resolve(theme),
            subtitle: Slot::Subtitle.resolve(theme),
            body: Slot::Body.resolve(theme),
            code: Slot::Code.resolve(theme),
        }
    }

    pub fn get(&self, slot: Slot) -> Rgba {
        match slot {
            Slot::Background => self.background,
            Slot::Title => self.title,
            Slot::Subtitle => self.subtitle,
            Slot::Body => self.body,
            Slot::Code => self.code,
        }
    }
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        ResolvedTheme::from_theme(None)
    }
}

/// Resolve the theme a slide is drawn with.
///
/// A present slide theme replaces the deck theme as a whole: slots it leaves
/// unset take the built-in defaults, not the deck's values.
pub fn resolve_theme(slide_theme: Option<&Theme>, deck_theme: Option<&Theme>) -> ResolvedTheme {
    ResolvedTheme::from_theme(slide_theme.or(deck_theme))
}
