//! 5-bit colour and 4-colour palette types.
//!
//! Colours are stored unpacked (one byte per channel) and packed to the
//! hardware's BGR555 word only when they are written to palette RAM.

use std::fmt;

/// Largest value a colour channel can hold.
pub const CHANNEL_MAX: u8 = 31;
/// Number of colours in one hardware palette.
pub const PALETTE_SIZE: usize = 4;
/// Bytes one palette occupies in palette RAM.
pub const PALETTE_BYTES: usize = PALETTE_SIZE * 2;

const CHANNEL_MASK: u16 = 0x1F;

/// One colour, three 5-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX);

    /// Build a colour, keeping only the low 5 bits of each channel.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r & CHANNEL_MAX,
            g: g & CHANNEL_MAX,
            b: b & CHANNEL_MAX,
        }
    }

    /// Pack into the little-endian BGR555 word the palette registers expect.
    pub const fn to_bgr555(self) -> u16 {
        (self.r as u16) | ((self.g as u16) << 5) | ((self.b as u16) << 10)
    }

    /// Unpack a BGR555 word. Bit 15 is ignored.
    pub const fn from_bgr555(word: u16) -> Self {
        Self {
            r: (word & CHANNEL_MASK) as u8,
            g: ((word >> 5) & CHANNEL_MASK) as u8,
            b: ((word >> 10) & CHANNEL_MASK) as u8,
        }
    }

    /// Expand to 8 bits per channel for display on a host terminal.
    pub const fn to_rgb888(self) -> (u8, u8, u8) {
        const fn scale(c: u8) -> u8 {
            let c = c & CHANNEL_MAX;
            (c << 3) | (c >> 2)
        }
        (scale(self.r), scale(self.g), scale(self.b))
    }

    /// Apply `f` to each channel.
    pub fn map_channels(self, mut f: impl FnMut(u8) -> u8) -> Self {
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
        }
    }

    /// Apply `f` to each channel paired with the matching channel of `other`.
    pub fn zip_channels(self, other: Color, mut f: impl FnMut(u8, u8) -> u8) -> Self {
        Self {
            r: f(self.r, other.r),
            g: f(self.g, other.g),
            b: f(self.b, other.b),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:>2},{:>2},{:>2})", self.r, self.g, self.b)
    }
}

/// A hardware palette: four colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Palette {
    colors: [Color; PALETTE_SIZE],
}

impl Palette {
    pub const fn new(colors: [Color; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    /// A palette with every entry set to `color`.
    pub const fn solid(color: Color) -> Self {
        Self {
            colors: [color; PALETTE_SIZE],
        }
    }

    pub fn color(&self, index: usize) -> Color {
        self.colors[index]
    }

    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut [Color; PALETTE_SIZE] {
        &mut self.colors
    }

    /// Serialize to the 8-byte palette RAM layout (low byte first).
    pub fn to_bytes(&self) -> [u8; PALETTE_BYTES] {
        let mut bytes = [0u8; PALETTE_BYTES];
        for (chunk, color) in bytes.chunks_exact_mut(2).zip(self.colors.iter()) {
            chunk.copy_from_slice(&color.to_bgr555().to_le_bytes());
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8; PALETTE_BYTES]) -> Self {
        let mut colors = [Color::BLACK; PALETTE_SIZE];
        for (color, chunk) in colors.iter_mut().zip(bytes.chunks_exact(2)) {
            *color = Color::from_bgr555(u16::from_le_bytes([chunk[0], chunk[1]]));
        }
        Self { colors }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, color) in self.colors.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", color)?;
        }
        write!(f, "}}")
    }
}

// ==============================================================================
// Constant palettes
// ==============================================================================

pub const ALL_BLACK: Palette = Palette::solid(Color::BLACK);
pub const ALL_WHITE: Palette = Palette::solid(Color::WHITE);

/// Boot palette left in the reserved slot so UI text stays readable.
pub const DEFAULT_GRAYSCALE: Palette = Palette::new([
    Color::new(31, 31, 31),
    Color::new(21, 21, 21),
    Color::new(10, 10, 10),
    Color::new(0, 0, 0),
]);

pub static REDS: Palette = Palette::new([
    Color::new(31, 21, 21),
    Color::new(31, 14, 14),
    Color::new(31, 7, 7),
    Color::new(31, 0, 0),
]);

pub static GREENS: Palette = Palette::new([
    Color::new(21, 31, 21),
    Color::new(14, 31, 14),
    Color::new(7, 31, 7),
    Color::new(0, 31, 0),
]);

pub static BLUES: Palette = Palette::new([
    Color::new(21, 21, 31),
    Color::new(14, 14, 31),
    Color::new(7, 7, 31),
    Color::new(0, 0, 31),
]);

pub static ORANGES: Palette = Palette::new([
    Color::new(31, 31, 24),
    Color::new(31, 28, 16),
    Color::new(31, 25, 8),
    Color::new(31, 22, 0),
]);

pub static CYANS: Palette = Palette::new([
    Color::new(21, 31, 31),
    Color::new(14, 31, 28),
    Color::new(7, 31, 25),
    Color::new(0, 31, 22),
]);

pub static PURPLES: Palette = Palette::new([
    Color::new(30, 24, 30),
    Color::new(28, 16, 28),
    Color::new(23, 8, 23),
    Color::new(21, 0, 21),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new_masks_to_five_bits() {
        let c = Color::new(0x3F, 32, 31);
        assert_eq!((c.r, c.g, c.b), (31, 0, 31));
    }

    #[test]
    fn test_bgr555_layout() {
        assert_eq!(Color::new(31, 0, 0).to_bgr555(), 0x001F);
        assert_eq!(Color::new(0, 31, 0).to_bgr555(), 0x03E0);
        assert_eq!(Color::new(0, 0, 31).to_bgr555(), 0x7C00);
        assert_eq!(Color::from_bgr555(0xFC00), Color::new(0, 0, 31));
    }

    #[test]
    fn test_to_rgb888() {
        assert_eq!(Color::WHITE.to_rgb888(), (255, 255, 255));
        assert_eq!(Color::BLACK.to_rgb888(), (0, 0, 0));
        assert_eq!(Color::new(16, 0, 0).to_rgb888().0, 132);
    }

    #[test]
    fn test_palette_bytes() {
        let bytes = REDS.to_bytes();
        assert_eq!(&bytes[6..8], &[0x1F, 0x00]);
        assert_eq!(Palette::from_bytes(&bytes), REDS);
    }

    #[test]
    fn test_palette_display() {
        let p = Palette::solid(Color::new(1, 2, 3));
        assert_eq!(
            p.to_string(),
            "{( 1, 2, 3) ( 1, 2, 3) ( 1, 2, 3) ( 1, 2, 3)}"
        );
    }

    #[test]
    fn test_constant_palettes_in_range() {
        for p in [&REDS, &GREENS, &BLUES, &ORANGES, &CYANS, &PURPLES] {
            for c in p.colors() {
                assert!(c.r <= CHANNEL_MAX && c.g <= CHANNEL_MAX && c.b <= CHANNEL_MAX);
            }
        }
    }
}
