//! Cosmetic theming: background, font, size and alignment cyclers
//!
//! Every cycler is an index walk over a fixed table with wraparound in both
//! directions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::settings::AppSettings;

/// Calm background palette
pub const BACKGROUND_COLORS: [&str; 19] = [
    "#F8FBFF", "#EEF6FF", "#EAF4F6", "#F8F8FA", "#E5E6EB",
    "#D2D4DC", "#C0C2CE", "#D0E1F9", "#EEE3E7", "#EAD5DC",
    "#FFF6E9", "#FFF5EE", "#FDF5E6", "#FAEBD7", "#E3F0FF",
    "#D2E7FF", "#A8E6CF", "#DCEDC1", "#FFD3B6",
];

/// Background used when a stored index falls outside the palette
pub const FALLBACK_BACKGROUND: &str = "#FFFFFF";

/// Minimal font families offered by the font button
pub const FONTS: [&str; 11] = [
    "Inter",
    "Space Grotesk",
    "Quicksand",
    "Playfair Display",
    "Merriweather",
    "Cormorant Garamond",
    "Space Mono",
    "Fira Code",
    "Courier Prime",
    "Oswald",
    "Syne",
];

/// Font sizes offered by the size button, in points
pub const FONT_SIZES: [f32; 11] = [
    12.0, 14.0, 16.0, 18.0, 20.0, 24.0, 28.0, 32.0, 36.0, 48.0, 72.0,
];

/// Slot used when the current size is not one of `FONT_SIZES` (36pt)
pub const DEFAULT_SIZE_INDEX: usize = 8;

/// Smallest size reachable with the keyboard zoom shortcuts
pub const MIN_FONT_SIZE: f32 = 4.0;

/// Step applied by the keyboard zoom shortcuts
pub const FONT_SIZE_STEP: f32 = 2.0;

/// Direction of a cycle step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Forward unless `reverse` (e.g. Shift held, or right click)
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}

/// Step `index` one slot in `dir` within a table of `len` entries
pub fn cycle(index: usize, len: usize, dir: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    let index = index.min(len - 1);
    match dir {
        Direction::Forward => (index + 1) % len,
        Direction::Backward => (index + len - 1) % len,
    }
}

/// Paragraph alignment of the editor text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    const ORDER: [Alignment; 4] = [
        Alignment::Left,
        Alignment::Center,
        Alignment::Right,
        Alignment::Justify,
    ];

    pub fn cycle(self, dir: Direction) -> Self {
        let index = Self::ORDER.iter().position(|a| *a == self).unwrap_or(0);
        Self::ORDER[cycle(index, Self::ORDER.len(), dir)]
    }

    /// One-letter label shown on the alignment button
    pub fn label(self) -> &'static str {
        match self {
            Alignment::Left => "L",
            Alignment::Center => "C",
            Alignment::Right => "R",
            Alignment::Justify => "J",
        }
    }
}

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("colour must start with '#': {0:?}")]
    MissingHash(String),
    #[error("colour must have 6 or 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digits in colour: {0:?}")]
    BadDigits(String),
}

impl Rgb {
    /// Parse `#RRGGBB` or `#AARRGGBB` (alpha is ignored)
    pub fn parse_hex(text: &str) -> Result<Self, ColorParseError> {
        let digits = text
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(text.to_string()))?;

        let rgb = match digits.len() {
            6 => digits,
            8 => digits
                .get(2..)
                .ok_or_else(|| ColorParseError::BadDigits(text.to_string()))?,
            _ => return Err(ColorParseError::BadLength(text.to_string())),
        };

        let channel = |i: usize| {
            rgb.get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| ColorParseError::BadDigits(text.to_string()))
        };

        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Relative luminance in `0.0..=1.0`
    pub fn luminance(self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }
}

/// Text colour readable on `background`
pub fn contrast_text_color(background: Rgb) -> Rgb {
    if background.luminance() < 0.5 {
        WHITE
    } else {
        BLACK
    }
}

/// Current cosmetic state of the editor
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background_index: usize,
    pub font_index: usize,
    pub font_size: f32,
    pub alignment: Alignment,
    pub bold: bool,
    pub italic: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

impl Theme {
    /// Build from persisted settings, clamping anything out of range
    pub fn from_settings(settings: &AppSettings) -> Self {
        let font_index = FONTS
            .iter()
            .position(|f| *f == settings.font_family)
            .unwrap_or(0);

        let font_size = if settings.font_size.is_finite() && settings.font_size >= MIN_FONT_SIZE {
            settings.font_size
        } else {
            FONT_SIZES[DEFAULT_SIZE_INDEX]
        };

        Self {
            background_index: settings.background_index,
            font_index,
            font_size,
            alignment: settings.text_alignment,
            bold: settings.is_bold,
            italic: settings.is_italic,
        }
    }

    /// Copy the cosmetic state back into the settings record
    pub fn store(&self, settings: &mut AppSettings) {
        settings.background_index = self.background_index;
        settings.font_family = self.font_family().to_string();
        settings.font_size = self.font_size;
        settings.text_alignment = self.alignment;
        settings.is_bold = self.bold;
        settings.is_italic = self.italic;
        settings.text_color = self.text_color().to_hex();
    }

    /// Hex string of the active background; white when the index is stale
    pub fn background_hex(&self) -> &'static str {
        BACKGROUND_COLORS
            .get(self.background_index)
            .copied()
            .unwrap_or(FALLBACK_BACKGROUND)
    }

    pub fn background(&self) -> Rgb {
        Rgb::parse_hex(self.background_hex()).unwrap_or(WHITE)
    }

    pub fn text_color(&self) -> Rgb {
        contrast_text_color(self.background())
    }

    pub fn font_family(&self) -> &'static str {
        FONTS[self.font_index.min(FONTS.len() - 1)]
    }

    pub fn cycle_background(&mut self, dir: Direction) {
        self.background_index = cycle(self.background_index, BACKGROUND_COLORS.len(), dir);
        tracing::debug!("Background -> {}", self.background_hex());
    }

    pub fn cycle_font(&mut self, dir: Direction) {
        self.font_index = cycle(self.font_index, FONTS.len(), dir);
        tracing::debug!("Font -> {}", self.font_family());
    }

    /// Step through `FONT_SIZES`; an off-table size restarts from the 36pt slot
    pub fn cycle_font_size(&mut self, dir: Direction) {
        let index = FONT_SIZES
            .iter()
            .position(|s| *s == self.font_size)
            .unwrap_or(DEFAULT_SIZE_INDEX);
        self.font_size = FONT_SIZES[cycle(index, FONT_SIZES.len(), dir)];
    }

    pub fn cycle_alignment(&mut self, dir: Direction) {
        self.alignment = self.alignment.cycle(dir);
    }

    /// Keyboard zoom in
    pub fn grow_font(&mut self) {
        self.font_size += FONT_SIZE_STEP;
    }

    /// Keyboard zoom out, never below `MIN_FONT_SIZE`
    pub fn shrink_font(&mut self) {
        if self.font_size > MIN_FONT_SIZE {
            self.font_size -= FONT_SIZE_STEP;
        }
    }

    pub fn toggle_bold(&mut self) {
        self.bold = !self.bold;
    }

    pub fn toggle_italic(&mut self) {
        self.italic = !self.italic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_both_ways() {
        assert_eq!(cycle(0, 4, Direction::Backward), 3);
        assert_eq!(cycle(3, 4, Direction::Forward), 0);
        assert_eq!(cycle(1, 4, Direction::Forward), 2);
        assert_eq!(cycle(0, 0, Direction::Forward), 0);
    }

    #[test]
    fn test_forward_then_backward_is_identity() {
        let mut theme = Theme::default();
        let start = theme.clone();

        for steps in [1, 5, 19, 23] {
            for _ in 0..steps {
                theme.cycle_background(Direction::Forward);
                theme.cycle_font(Direction::Forward);
                theme.cycle_alignment(Direction::Forward);
            }
            for _ in 0..steps {
                theme.cycle_background(Direction::Backward);
                theme.cycle_font(Direction::Backward);
                theme.cycle_alignment(Direction::Backward);
            }
            assert_eq!(theme, start);
        }
    }

    #[test]
    fn test_font_size_cycle_symmetry() {
        let mut theme = Theme {
            font_size: 18.0,
            ..Theme::default()
        };
        for _ in 0..13 {
            theme.cycle_font_size(Direction::Backward);
        }
        for _ in 0..13 {
            theme.cycle_font_size(Direction::Forward);
        }
        assert_eq!(theme.font_size, 18.0);
    }

    #[test]
    fn test_off_table_size_starts_from_default_slot() {
        let mut theme = Theme {
            font_size: 19.0,
            ..Theme::default()
        };
        theme.cycle_font_size(Direction::Forward);
        assert_eq!(theme.font_size, 48.0);
    }

    #[test]
    fn test_alignment_order() {
        let mut a = Alignment::Left;
        let mut labels = String::new();
        for _ in 0..4 {
            a = a.cycle(Direction::Forward);
            labels.push_str(a.label());
        }
        assert_eq!(labels, "CRJL");
        assert_eq!(Alignment::Left.cycle(Direction::Backward), Alignment::Justify);
    }

    #[test]
    fn test_stale_background_index_falls_back_to_white() {
        let theme = Theme {
            background_index: 99,
            ..Theme::default()
        };
        assert_eq!(theme.background_hex(), FALLBACK_BACKGROUND);
        assert_eq!(theme.text_color(), BLACK);

        let mut theme = theme;
        theme.cycle_background(Direction::Forward);
        assert!(theme.background_index < BACKGROUND_COLORS.len());
    }

    #[test]
    fn test_unknown_font_resolves_to_first() {
        let settings = AppSettings {
            font_family: "Comic Sans".to_string(),
            ..AppSettings::default()
        };
        let theme = Theme::from_settings(&settings);
        assert_eq!(theme.font_family(), "Inter");
    }

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(Rgb::parse_hex("#A8E6CF").unwrap(), Rgb { r: 0xA8, g: 0xE6, b: 0xCF });
        assert_eq!(Rgb::parse_hex("#FF000000").unwrap(), BLACK);
        assert!(matches!(Rgb::parse_hex("A8E6CF"), Err(ColorParseError::MissingHash(_))));
        assert!(matches!(Rgb::parse_hex("#12345"), Err(ColorParseError::BadLength(_))));
        assert!(matches!(Rgb::parse_hex("#GGGGGG"), Err(ColorParseError::BadDigits(_))));
    }

    #[test]
    fn test_contrast_text_color() {
        for hex in BACKGROUND_COLORS {
            // Every calm background is light
            assert_eq!(contrast_text_color(Rgb::parse_hex(hex).unwrap()), BLACK);
        }
        assert_eq!(contrast_text_color(Rgb { r: 30, g: 30, b: 40 }), WHITE);
    }

    #[test]
    fn test_keyboard_zoom_floor() {
        let mut theme = Theme {
            font_size: 6.0,
            ..Theme::default()
        };
        theme.shrink_font();
        assert_eq!(theme.font_size, 4.0);
        theme.shrink_font();
        assert_eq!(theme.font_size, 4.0);
        theme.grow_font();
        assert_eq!(theme.font_size, 6.0);
    }
}
