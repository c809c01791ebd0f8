//! Navigation state: scroll-spy, mobile menu, smooth-scroll easing and the
//! keyboard-focus indicator.

/// Vertical extent of a page section in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    /// `[top - offset, top - offset + height)` contains `scroll_y`.
    pub fn contains(&self, scroll_y: f64, offset: f64) -> bool {
        let start = self.top - offset;
        scroll_y >= start && scroll_y < start + self.height
    }
}

/// Tracks which section the reader is in.
#[derive(Clone, Debug)]
pub struct ScrollSpy {
    offset: f64,
    current: Option<String>,
}

impl ScrollSpy {
    pub fn new(offset: f64, initial: Option<&str>) -> Self {
        Self {
            offset,
            current: initial.map(str::to_owned),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// First section in document order whose window contains `scroll_y`.
    pub fn locate<'a>(
        &self,
        sections: &'a [SectionBounds],
        scroll_y: f64,
    ) -> Option<&'a SectionBounds> {
        sections.iter().find(|s| s.contains(scroll_y, self.offset))
    }

    /// Record the section at `scroll_y`. Returns the new id only when it
    /// changed; when nothing matches the previous section persists.
    pub fn observe(&mut self, sections: &[SectionBounds], scroll_y: f64) -> Option<&str> {
        let hit = self.locate(sections, scroll_y)?;
        if self.current.as_deref() == Some(hit.id.as_str()) {
            return None;
        }
        self.current = Some(hit.id.clone());
        self.current.as_deref()
    }
}

/// Does a nav link's `href` point at `section_id`?
pub fn link_targets(href: &str, section_id: &str) -> bool {
    href.strip_prefix('#') == Some(section_id)
}

pub fn navbar_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether the menu was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }
}

/// Quadratic ease-in-out: `t` elapsed, `b` start, `c` distance, `d` duration.
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    if d <= 0.0 {
        return b + c;
    }
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    t -= 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

/// Frame-driven scroll animation for browsers without native smooth scroll.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    from: f64,
    distance: f64,
    duration: f64,
    started_at: Option<f64>,
}

impl SmoothScroll {
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            distance: to - from,
            duration,
            started_at: None,
        }
    }

    /// Scroll position for the frame at `now`, and whether another frame is needed.
    pub fn frame(&mut self, now: f64) -> (f64, bool) {
        let start = *self.started_at.get_or_insert(now);
        let elapsed = now - start;
        if elapsed >= self.duration {
            return (self.from + self.distance, false);
        }
        (ease_in_out_quad(elapsed, self.from, self.distance, self.duration), true)
    }
}

/// Focus rings are shown only while the user navigates with the keyboard.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardFocus {
    active: bool,
}

impl KeyboardFocus {
    /// Returns `Some(new_state)` when the state changes.
    pub fn on_key(&mut self, key: &str) -> Option<bool> {
        (key == "Tab" && !self.active).then(|| {
            self.active = true;
            true
        })
    }

    pub fn on_pointer_down(&mut self) -> Option<bool> {
        self.active.then(|| {
            self.active = false;
            false
        })
    }
}
