use quicksilver::graphics::Color;

/// Game colour palette, as 0xRRGGBB
pub struct Palette;

impl Palette {
    pub const BACKGROUND: u32 = 0x000010;
    pub const BACKGROUND_HIGHLIGHT: u32 = 0x222244;
    pub const HIGHLIGHT: u32 = 0xD1E000;
    pub const BRIGHT: u32 = 0xF1FF33;
    pub const DIM: u32 = 0x858F00;
    pub const INVALID: u32 = 0x5A1020;

    pub fn color(hex: u32) -> Color {
        Palette::color_alpha(hex, 1.0)
    }

    pub fn color_alpha(hex: u32, alpha: f32) -> Color {
        Color::from_rgba(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
            alpha,
        )
    }
}

/// Z-index for sprite layers
pub struct Layers;

impl Layers {
    pub const BACKGROUND: f32 = 10.0;
    pub const UI_BACKGROUND: f32 = 20.0;
    pub const UI_CARDS: f32 = 30.0;
    pub const INTERACTION: f32 = 40.0;
}
