//! Startup sequencer: simulated load progress, then the entrance sequence.

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::config::LoaderTiming;
use crate::random::RandomSource;
use crate::schedule::{SharedScheduler, every};

/// Visual side of the loader.
pub trait ProgressSurface {
    fn set_progress(&self, progress: &LoadProgress);
    fn dismiss(&self);
}

/// Monotonic progress value clamped to 100.
#[derive(Clone, Debug)]
pub struct LoadProgress {
    value: f64,
    max_increment: f64,
}

impl LoadProgress {
    pub fn new(max_increment: f64) -> Self {
        Self {
            value: 0.0,
            max_increment: max_increment.max(0.0),
        }
    }

    /// Add `roll * max_increment` (roll in `[0,1)`) and return the new value.
    pub fn advance(&mut self, roll: f64) -> f64 {
        let step = roll.clamp(0.0, 1.0) * self.max_increment;
        self.value = (self.value + step).min(100.0);
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whole-percent readout.
    pub fn label(&self) -> String {
        format!("{}%", self.value.floor() as u32)
    }

    pub fn is_complete(&self) -> bool {
        self.value >= 100.0
    }
}

/// Page-wide "loaded" flag. Set once by the sequencer, never reset.
#[derive(Clone, Debug, Default)]
pub struct LoadFlag(Rc<Cell<bool>>);

impl LoadFlag {
    pub fn is_loaded(&self) -> bool {
        self.0.get()
    }

    fn mark(&self) {
        self.0.set(true);
    }
}

pub struct StartupSequencer {
    scheduler: SharedScheduler,
    timing: LoaderTiming,
    rng: Rc<RefCell<dyn RandomSource>>,
    surface: Rc<dyn ProgressSurface>,
}

impl StartupSequencer {
    pub fn new(
        scheduler: SharedScheduler,
        timing: LoaderTiming,
        rng: Rc<RefCell<dyn RandomSource>>,
        surface: Rc<dyn ProgressSurface>,
    ) -> Self {
        Self {
            scheduler,
            timing,
            rng,
            surface,
        }
    }

    /// Begin ticking. `on_loaded` runs exactly once, `settle_ms` after progress
    /// first reaches 100.
    pub fn start(self, on_loaded: impl FnOnce() + 'static) -> LoadFlag {
        let flag = LoadFlag::default();
        let mut progress = LoadProgress::new(self.timing.max_increment);
        let mut on_loaded = Some(on_loaded);
        let settle_ms = self.timing.settle_ms;
        let scheduler = self.scheduler.clone();
        let done_flag = flag.clone();
        let (rng, surface) = (self.rng, self.surface);

        every(&self.scheduler, self.timing.tick_ms, move || {
            let roll = rng.borrow_mut().next_f64();
            progress.advance(roll);
            surface.set_progress(&progress);
            if !progress.is_complete() {
                return ControlFlow::Continue(());
            }
            let surface = surface.clone();
            let flag = done_flag.clone();
            let callback = on_loaded.take();
            scheduler.schedule(
                settle_ms,
                Box::new(move || {
                    surface.dismiss();
                    flag.mark();
                    tracing::info!("page loaded");
                    if let Some(cb) = callback {
                        cb();
                    }
                }),
            );
            ControlFlow::Break(())
        });
        flag
    }
}
