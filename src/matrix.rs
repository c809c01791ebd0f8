//! "Matrix rain" model: one falling glyph per column.

use crate::config::MatrixTiming;
use crate::random::RandomSource;

const GLYPHS: [char; 2] = ['0', '1'];

/// One glyph to draw this frame, in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug)]
pub struct MatrixRain {
    timing: MatrixTiming,
    height: f64,
    drops: Vec<u32>,
}

impl MatrixRain {
    pub fn new(timing: MatrixTiming, width: f64, height: f64) -> Self {
        let mut rain = Self {
            timing,
            height,
            drops: Vec::new(),
        };
        rain.resize(width, height);
        rain
    }

    /// Keeps existing drop positions; new columns start at the top.
    pub fn resize(&mut self, width: f64, height: f64) {
        let cols = if self.timing.font_px > 0.0 {
            (width / self.timing.font_px).floor().max(0.0) as usize
        } else {
            0
        };
        self.drops.resize(cols, 1);
        self.height = height;
    }

    /// Advance every drop one row and return the glyphs to draw.
    pub fn step(&mut self, rng: &mut dyn RandomSource) -> Vec<Glyph> {
        let font = self.timing.font_px;
        let mut out = Vec::with_capacity(self.drops.len());
        for (i, drop) in self.drops.iter_mut().enumerate() {
            let pick = ((rng.next_f64() * GLYPHS.len() as f64) as usize).min(GLYPHS.len() - 1);
            let y = *drop as f64 * font;
            out.push(Glyph {
                ch: GLYPHS[pick],
                x: i as f64 * font,
                y,
            });
            if y > self.height && rng.next_f64() >= 1.0 - self.timing.reset_chance {
                *drop = 0;
            }
            *drop += 1;
        }
        out
    }
}
