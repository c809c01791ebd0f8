//! Scroll reveal bookkeeping and the scroll-trigger replay model.

/// Visibility fraction at which the intersection observer reveals an element.
pub const OBSERVER_THRESHOLD: f64 = 0.1;
/// Negative bottom margin fires the observer slightly before the element is in view.
pub const OBSERVER_ROOT_MARGIN: &str = "0px 0px -100px 0px";

pub const REVEALED_CLASS: &str = "revealed";

/// One-way reveal flags for the page's reveal targets, indexed by document order.
#[derive(Clone, Debug, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(len: usize) -> Self {
        Self {
            revealed: vec![false; len],
        }
    }

    /// Mark `index` revealed. True only the first time.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.revealed.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    pub fn pending(&self) -> impl Iterator<Item = usize> + '_ {
        self.revealed
            .iter()
            .enumerate()
            .filter(|(_, r)| !**r)
            .map(|(i, _)| i)
    }
}

/// Fallback pass: reveal once the element's top is `margin` px above the
/// bottom of the viewport.
pub fn fallback_should_reveal(element_top: f64, viewport_height: f64, margin: f64) -> bool {
    element_top < viewport_height - margin
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Reverse,
}

/// "play none none reverse": play when the element's top crosses the start
/// line going down, reverse when it goes back above it.
#[derive(Clone, Copy, Debug)]
pub struct ScrollToggle {
    /// Start line as a fraction of viewport height measured from the top.
    start_fraction: f64,
    active: bool,
}

impl ScrollToggle {
    pub fn new(start_fraction: f64) -> Self {
        Self {
            start_fraction,
            active: false,
        }
    }

    pub fn update(&mut self, element_top: f64, viewport_height: f64) -> Option<ToggleAction> {
        let past = element_top <= viewport_height * self.start_fraction;
        match (self.active, past) {
            (false, true) => {
                self.active = true;
                Some(ToggleAction::Play)
            }
            (true, false) => {
                self.active = false;
                Some(ToggleAction::Reverse)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_is_one_way() {
        let mut t = RevealTracker::new(2);
        assert!(t.reveal(1));
        assert!(!t.reveal(1));
        assert_eq!(t.pending().collect::<Vec<_>>(), vec![0]);
        assert!(!t.reveal(9));
    }

    #[test]
    fn fallback_uses_margin() {
        assert!(fallback_should_reveal(649.0, 800.0, 150.0));
        assert!(!fallback_should_reveal(650.0, 800.0, 150.0));
    }

    #[test]
    fn toggle_plays_and_reverses_once_per_crossing() {
        let mut t = ScrollToggle::new(0.8);
        assert_eq!(t.update(900.0, 1000.0), None);
        assert_eq!(t.update(790.0, 1000.0), Some(ToggleAction::Play));
        assert_eq!(t.update(100.0, 1000.0), None);
        assert_eq!(t.update(-500.0, 1000.0), None);
        assert_eq!(t.update(850.0, 1000.0), Some(ToggleAction::Reverse));
        assert_eq!(t.update(700.0, 1000.0), Some(ToggleAction::Play));
    }
}
