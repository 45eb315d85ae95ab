//! RGB colors.
//!
//! The DOT exporter writes colors as `#rrggbb`; the GEXF exporter needs the
//! individual channels for `viz:color`.

use core::fmt;

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` literal.
    pub const fn from_u32(packed: u32) -> Self {
        Self::new(
            ((packed >> 16) & 0xff) as u8,
            ((packed >> 8) & 0xff) as u8,
            (packed & 0xff) as u8,
        )
    }

    /// The channels as a tuple, in `(r, g, b)` order.
    pub fn channels(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_channels() {
        assert_eq!(Rgb::from_u32(0xff8080), Rgb::new(255, 128, 128));
        assert_eq!(Rgb::from_u32(0xd5f6ff).channels(), (0xd5, 0xf6, 0xff));
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Rgb::new(0xA0, 0xA0, 0xA0).to_string(), "#a0a0a0");
        assert_eq!(Rgb::from_u32(0x000000).to_string(), "#000000");
    }
}
