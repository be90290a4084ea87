use ratatui::style::Color;

/// Colours used across the UI (Gruvbox Material dark)
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Semantic colors
    pub selection: Color,
    pub breaking: Color,
    pub bookmark: Color,
    pub dot_active: Color,
    pub dot_inactive: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            selection: Color::Rgb(0x45, 0x40, 0x3d),
            breaking: Color::Rgb(0xea, 0x69, 0x62),
            bookmark: Color::Rgb(0xe7, 0x8a, 0x4e),
            dot_active: Color::Rgb(0xdd, 0xc7, 0xa1),
            dot_inactive: Color::Rgb(0x7c, 0x6f, 0x64),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
        }
    }
}

/// Mix `fg` over `bg` at `opacity` (0 = bg, 1 = fg).
/// Non-RGB colours cannot be mixed and snap at 0.5.
pub fn blend(fg: Color, bg: Color, opacity: f64) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (fg, bg) {
        (Color::Rgb(fr, fg_, fb), Color::Rgb(br, bg_, bb)) => {
            let mix = |f: u8, b: u8| (b as f64 + (f as f64 - b as f64) * opacity).round() as u8;
            Color::Rgb(mix(fr, br), mix(fg_, bg_), mix(fb, bb))
        }
        _ if opacity >= 0.5 => fg,
        _ => bg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        let fg = Color::Rgb(200, 100, 0);
        let bg = Color::Rgb(0, 0, 100);
        assert_eq!(blend(fg, bg, 1.0), fg);
        assert_eq!(blend(fg, bg, 0.0), bg);
        assert_eq!(blend(fg, bg, 0.5), Color::Rgb(100, 50, 50));
    }

    #[test]
    fn test_blend_named_colors() {
        assert_eq!(blend(Color::White, Color::Black, 0.6), Color::White);
        assert_eq!(blend(Color::White, Color::Black, 0.4), Color::Black);
    }
}
