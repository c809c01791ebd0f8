//! Pointer-driven 3D tilt for `[data-tilt]` elements.

pub const MAX_TILT_DEG: f64 = 10.0;
pub const ENTER_TRANSITION: &str = "transform 0.1s ease-out";
pub const LEAVE_TRANSITION: &str = "transform 0.3s ease-out";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub scale: f64,
}

impl Tilt {
    pub const NEUTRAL: Tilt = Tilt {
        rotate_x: 0.0,
        rotate_y: 0.0,
        scale: 1.0,
    };

    /// Rotation proportional to the pointer's offset from the element centre,
    /// capped at ±10° on each axis.
    pub fn from_pointer(client_x: f64, client_y: f64, rect: Rect) -> Self {
        let center_x = rect.width / 2.0;
        let center_y = rect.height / 2.0;
        if center_x <= 0.0 || center_y <= 0.0 {
            return Tilt {
                scale: 1.05,
                ..Tilt::NEUTRAL
            };
        }
        let x = client_x - rect.left;
        let y = client_y - rect.top;
        let clamp = |deg: f64| deg.clamp(-MAX_TILT_DEG, MAX_TILT_DEG);
        let rotate_x = clamp(-MAX_TILT_DEG * (y - center_y) / center_y);
        let rotate_y = clamp(MAX_TILT_DEG * (x - center_x) / center_x);
        Tilt {
            rotate_x,
            rotate_y,
            scale: 1.05,
        }
    }

    pub fn css(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) scale({})",
            self.rotate_x, self.rotate_y, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn centre_is_flat() {
        let t = Tilt::from_pointer(200.0, 100.0, CARD);
        assert_eq!((t.rotate_x, t.rotate_y), (0.0, 0.0));
        assert_eq!(t.scale, 1.05);
    }

    #[test]
    fn corners_reach_the_cap() {
        let t = Tilt::from_pointer(300.0, 50.0, CARD);
        assert_eq!(t.rotate_x, 10.0);
        assert_eq!(t.rotate_y, 10.0);
        let t = Tilt::from_pointer(100.0, 150.0, CARD);
        assert_eq!(t.rotate_x, -10.0);
        assert_eq!(t.rotate_y, -10.0);
    }

    #[test]
    fn pointer_outside_is_capped() {
        let t = Tilt::from_pointer(900.0, -400.0, CARD);
        assert_eq!((t.rotate_x, t.rotate_y), (10.0, 10.0));
    }

    #[test]
    fn neutral_css() {
        assert_eq!(Tilt::NEUTRAL.css(), "perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1)");
    }
}
