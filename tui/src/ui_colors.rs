//! Card palette (indigo primary, cyan accent).

use ratatui::style::Color;

pub const PRIMARY: Color = Color::Rgb(0x63, 0x66, 0xF1);
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x81, 0x8C, 0xF8);
pub const SECONDARY: Color = Color::Rgb(0x22, 0xD3, 0xEE);
pub const SUCCESS: Color = Color::Rgb(0x10, 0xB9, 0x81);
pub const DANGER: Color = Color::Rgb(0xEF, 0x44, 0x44);

pub fn primary_color() -> Color {
    PRIMARY
}

pub fn primary_light_color() -> Color {
    PRIMARY_LIGHT
}

pub fn secondary_color() -> Color {
    SECONDARY
}

pub fn success_color() -> Color {
    SUCCESS
}

pub fn danger_color() -> Color {
    DANGER
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn palette_is_plain_rgb() {
        assert_eq!(primary_color(), Color::Rgb(0x63, 0x66, 0xF1));
        assert_eq!(danger_color(), Color::Rgb(0xEF, 0x44, 0x44));
        assert_eq!(success_color(), Color::Rgb(0x10, 0xB9, 0x81));
    }

    #[test]
    fn status_colors_are_distinct() {
        let colors = [
            primary_color(),
            primary_light_color(),
            secondary_color(),
            success_color(),
            danger_color(),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
