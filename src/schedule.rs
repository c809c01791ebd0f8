//! Timer abstraction for staged UI sequences.
//!
//! Every delayed step on the page (loader ticks, typing, form stages,
//! notification lifecycle, glitch flicker, matrix frames) goes through a
//! [`Scheduler`]. In the browser this is `setTimeout`; in tests it is
//! [`ManualScheduler`], a virtual clock advanced explicitly.

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

pub type Task = Box<dyn FnOnce()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub i64);

pub trait Scheduler {
    /// Milliseconds on a monotonic clock.
    fn now_ms(&self) -> f64;
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId;
    fn cancel(&self, id: TimerId);
}

pub type SharedScheduler = Rc<dyn Scheduler>;

type Tick = Rc<RefCell<dyn FnMut() -> ControlFlow<()>>>;

/// Run `tick` every `period_ms` until it returns `ControlFlow::Break`.
pub fn every(
    scheduler: &SharedScheduler,
    period_ms: u32,
    tick: impl FnMut() -> ControlFlow<()> + 'static,
) {
    fn arm(scheduler: SharedScheduler, period_ms: u32, tick: Tick) {
        let next = scheduler.clone();
        scheduler.schedule(
            period_ms,
            Box::new(move || {
                let flow = {
                    let mut f = tick.borrow_mut();
                    (&mut *f)()
                };
                if flow.is_continue() {
                    arm(next, period_ms, tick);
                }
            }),
        );
    }
    let tick: Tick = Rc::new(RefCell::new(tick));
    arm(scheduler.clone(), period_ms, tick);
}

// --- Virtual clock -----------------------------------------------------------

struct Pending {
    id: i64,
    due: f64,
    task: Task,
}

#[derive(Default)]
struct Queue {
    now: f64,
    next_id: i64,
    pending: Vec<Pending>,
}

/// Deterministic scheduler: nothing runs until [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<Queue>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Move the clock forward by `ms`, running every task that falls due in
    /// (due time, scheduling order) order. Tasks scheduled while advancing
    /// run too if they fall inside the window.
    pub fn advance(&self, ms: f64) {
        let target = self.queue.borrow().now + ms;
        loop {
            let next = {
                let mut q = self.queue.borrow_mut();
                let idx = q
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
                    .map(|(i, _)| i);
                match idx {
                    Some(i) => {
                        let p = q.pending.remove(i);
                        q.now = p.due;
                        Some(p.task)
                    }
                    None => None,
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.queue.borrow_mut().now = target;
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }
}

impl Scheduler for ManualScheduler {
    fn now_ms(&self) -> f64 {
        self.queue.borrow().now
    }

    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId {
        let mut q = self.queue.borrow_mut();
        let id = q.next_id;
        q.next_id += 1;
        let due = q.now + delay_ms as f64;
        q.pending.push(Pending { id, due, task });
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) {
        self.queue.borrow_mut().pending.retain(|p| p.id != id.0);
    }
}

// --- Rate limiting -----------------------------------------------------------

/// Trailing-edge debounce: only the last call in a burst runs, `wait_ms` after
/// the burst goes quiet.
pub struct Debounce {
    scheduler: SharedScheduler,
    wait_ms: u32,
    armed: Rc<Cell<Option<TimerId>>>,
}

impl Debounce {
    pub fn new(scheduler: SharedScheduler, wait_ms: u32) -> Self {
        Self {
            scheduler,
            wait_ms,
            armed: Rc::new(Cell::new(None)),
        }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        if let Some(id) = self.armed.take() {
            self.scheduler.cancel(id);
        }
        let armed = self.armed.clone();
        let id = self.scheduler.schedule(
            self.wait_ms,
            Box::new(move || {
                armed.set(None);
                f();
            }),
        );
        self.armed.set(Some(id));
    }
}

/// Leading-edge throttle: the first call runs, further calls within
/// `limit_ms` are dropped.
pub struct Throttle {
    scheduler: SharedScheduler,
    limit_ms: u32,
    blocked: Rc<Cell<bool>>,
}

impl Throttle {
    pub fn new(scheduler: SharedScheduler, limit_ms: u32) -> Self {
        Self {
            scheduler,
            limit_ms,
            blocked: Rc::new(Cell::new(false)),
        }
    }

    pub fn call(&self, f: impl FnOnce()) -> bool {
        if self.blocked.get() {
            return false;
        }
        f();
        self.blocked.set(true);
        let blocked = self.blocked.clone();
        self.scheduler.schedule(self.limit_ms, Box::new(move || blocked.set(false)));
        true
    }
}
