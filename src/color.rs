// Pen colors and the sources that pick them for each drawn edge

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Highest channel value a random color may take, never pure white
pub const RANDOM_CHANNEL_MAX: u8 = 254;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Packed `0RGB` form used by framebuffer windows
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Anything that can hand out the next pen color
pub trait ColorSource {
    fn next_color(&mut self) -> Rgb;
}

/// Independent uniform channels in `0..=RANDOM_CHANNEL_MAX`
pub struct RandomColors<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomColors<R> {
    pub fn new(rng: R) -> Self {
        RandomColors { rng }
    }
}

impl RandomColors<StdRng> {
    pub fn from_entropy() -> Self {
        RandomColors::new(StdRng::from_entropy())
    }

    /// Reproducible colors for a given seed
    pub fn seeded(seed: u64) -> Self {
        RandomColors::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ColorSource for RandomColors<R> {
    fn next_color(&mut self) -> Rgb {
        Rgb::new(
            self.rng.gen_range(0..=RANDOM_CHANNEL_MAX),
            self.rng.gen_range(0..=RANDOM_CHANNEL_MAX),
            self.rng.gen_range(0..=RANDOM_CHANNEL_MAX),
        )
    }
}

/// Always the same color
#[derive(Clone, Copy, Debug)]
pub struct FixedColor(pub Rgb);

impl ColorSource for FixedColor {
    fn next_color(&mut self) -> Rgb {
        self.0
    }
}
