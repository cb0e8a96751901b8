//! Catppuccin Mocha color palette for the TUI.

use ratatui::style::Color;

/// Named tag colors, matched as substrings of an epic's tag
/// (`"blue"`, `"bg-blue-500"`, ...).
const TAG_NAMES: [&str; 8] = [
    "blue", "orange", "yellow", "red", "green", "purple", "pink", "teal",
];

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,

    // Borders
    pub border: Color,

    /// Bar colors, indexed like [`TAG_NAMES`].
    pub tags: [Color; 8],

    /// Draw bars with a fill glyph instead of a background color.
    pub monochrome: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Pick a theme from the environment, respecting `NO_COLOR`.
    pub fn from_env() -> Self {
        if std::env::var_os("NO_COLOR").is_some() {
            Self::monochrome()
        } else {
            Self::mocha()
        }
    }

    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244

            // Foregrounds
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            // Accents
            primary: Color::Rgb(180, 190, 254), // #b4befe (lavender)

            // Borders
            border: Color::Rgb(69, 71, 90), // #45475a

            tags: [
                Color::Rgb(137, 180, 250), // #89b4fa (blue)
                Color::Rgb(250, 179, 135), // #fab387 (peach)
                Color::Rgb(249, 226, 175), // #f9e2af (yellow)
                Color::Rgb(243, 139, 168), // #f38ba8 (red)
                Color::Rgb(166, 227, 161), // #a6e3a1 (green)
                Color::Rgb(203, 166, 247), // #cba6f7 (mauve)
                Color::Rgb(245, 194, 231), // #f5c2e7 (pink)
                Color::Rgb(148, 226, 213), // #94e2d5 (teal)
            ],
            monochrome: false,
        }
    }

    /// No colors at all; bars are drawn with a fill glyph.
    pub fn monochrome() -> Self {
        Self {
            base: Color::Reset,
            surface: Color::Reset,
            text: Color::Reset,
            subtext: Color::Reset,
            muted: Color::Reset,
            primary: Color::Reset,
            border: Color::Reset,
            tags: [Color::Reset; 8],
            monochrome: true,
        }
    }

    /// Bar color for an epic tag.
    ///
    /// Known color names win; anything else hashes onto the palette so the
    /// same tag always gets the same color.
    pub fn tag_color(&self, tag: &str) -> Color {
        let lower = tag.to_ascii_lowercase();
        let index = TAG_NAMES
            .iter()
            .position(|name| lower.contains(name))
            .unwrap_or_else(|| {
                let hash = lower
                    .bytes()
                    .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(usize::from(b)));
                hash % self.tags.len()
            });
        self.tags[index]
    }
}
