//! Screen-space layout for the battlefield
//!
//! Flat-topped hexes, squashed by an isometric scale and shifted so hex (0, 0)
//! sits at the configured screen offset.

use glam::Vec2;

use crate::battle::hex::HexCoord;
use crate::core::config::LayoutConfig;

const SQRT_3: f32 = 1.732_050_8;

/// Converts between hex coordinates and pixels
#[derive(Debug, Clone)]
pub struct HexLayout {
    config: LayoutConfig,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl HexLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Current hex size (changes with zoom)
    pub fn hex_size(&self) -> f32 {
        self.config.hex_size
    }

    /// Pixel position of a hex center
    pub fn hex_to_pixel(&self, hex: HexCoord) -> Vec2 {
        let size = self.config.hex_size;
        let x = size * (1.5 * hex.q as f32);
        let y = size * (SQRT_3 / 2.0 * hex.q as f32 + SQRT_3 * hex.r as f32);
        self.to_screen(Vec2::new(x, y))
    }

    /// Hex containing a pixel
    ///
    /// Lossy in the pixel direction; exact for hex centers.
    pub fn pixel_to_hex(&self, pixel: Vec2) -> HexCoord {
        let flat = self.from_screen(pixel);
        let size = self.config.hex_size;
        let q = (2.0 / 3.0 * flat.x) / size;
        let r = (-1.0 / 3.0 * flat.x + SQRT_3 / 3.0 * flat.y) / size;
        HexCoord::round(q, r)
    }

    /// The six corners of a hex, starting east and going clockwise on screen
    pub fn hex_corners(&self, hex: HexCoord) -> [Vec2; 6] {
        let size = self.config.hex_size;
        let center = self.from_screen(self.hex_to_pixel(hex));
        std::array::from_fn(|i| {
            let angle = (60.0 * i as f32).to_radians();
            self.to_screen(center + Vec2::new(size * angle.cos(), size * angle.sin()))
        })
    }

    pub fn zoom_in(&mut self) {
        let size = self.config.hex_size * self.config.zoom_step;
        self.config.hex_size = size.min(self.config.max_hex_size);
    }

    pub fn zoom_out(&mut self) {
        let size = self.config.hex_size / self.config.zoom_step;
        self.config.hex_size = size.max(self.config.min_hex_size);
    }

    fn to_screen(&self, flat: Vec2) -> Vec2 {
        Vec2::new(
            flat.x * self.config.iso_scale_x + self.config.offset_x,
            flat.y * self.config.iso_scale_y + self.config.offset_y,
        )
    }

    fn from_screen(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            (pixel.x - self.config.offset_x) / self.config.iso_scale_x,
            (pixel.y - self.config.offset_y) / self.config.iso_scale_y,
        )
    }
}
