//! Decorative effects: hover targets, parallax offsets, glitch flicker
//! and the per-element transform composition shared by parallax and tilt.

use crate::tilt::Tilt;

pub const HOVER_TARGETS: &str = "a, button, .btn, .project-card, .interest-card, .skill-item";

pub fn hero_parallax(scroll_y: f64) -> f64 {
    scroll_y * 0.5
}

/// Deeper floating elements drift faster.
pub fn float_parallax(scroll_y: f64, index: usize) -> f64 {
    scroll_y * (0.2 + index as f64 * 0.1)
}

/// `roll` in `[0,1)`; flicker with probability `chance`.
pub fn should_glitch(roll: f64, chance: f64) -> bool {
    roll >= 1.0 - chance
}

pub const GLITCH_ANIMATION: &str = "glitch 2s infinite";
pub const FRENZY_ANIMATION: &str = "glitch 0.5s infinite";

/// Layers that may write an element's `transform`. Each writer owns one
/// layer; the element's style is always the composition of both.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TransformStack {
    translate_y: Option<f64>,
    tilt: Option<Tilt>,
}

impl TransformStack {
    pub fn set_parallax(&mut self, offset: f64) -> String {
        self.translate_y = Some(offset);
        self.css()
    }

    pub fn set_tilt(&mut self, tilt: Tilt) -> String {
        self.tilt = Some(tilt);
        self.css()
    }

    pub fn css(&self) -> String {
        match (self.translate_y, self.tilt) {
            (None, None) => "none".to_string(),
            (Some(y), None) => format!("translateY({y}px)"),
            (None, Some(t)) => t.css(),
            (Some(y), Some(t)) => format!("translateY({y}px) {}", t.css()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parallax_speeds() {
        assert_eq!(hero_parallax(200.0), 100.0);
        assert!((float_parallax(100.0, 2) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn glitch_chance_bounds() {
        assert!(!should_glitch(0.0, 0.1));
        assert!(!should_glitch(0.89, 0.1));
        assert!(should_glitch(0.95, 0.1));
        assert!(!should_glitch(0.999, 0.0));
    }

    #[test]
    fn parallax_and_tilt_compose() {
        let mut stack = TransformStack::default();
        assert_eq!(stack.css(), "none");
        assert_eq!(stack.set_parallax(12.0), "translateY(12px)");
        let css = stack.set_tilt(Tilt::NEUTRAL);
        assert_eq!(
            css,
            "translateY(12px) perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1)"
        );
        assert!(stack.set_parallax(30.0).contains("rotateX(0deg)"));
    }
}
