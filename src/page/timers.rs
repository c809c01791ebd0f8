//! Browser timer backends: `setTimeout` scheduler and animation-frame loops.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::schedule::{Scheduler, Task, TimerId};

pub struct BrowserScheduler {
    win: Window,
}

impl BrowserScheduler {
    pub fn new(win: Window) -> Self {
        Self { win }
    }
}

impl Scheduler for BrowserScheduler {
    fn now_ms(&self) -> f64 {
        self.win.performance().map(|p| p.now()).unwrap_or(0.0)
    }

    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId {
        let callback = Closure::once_into_js(move || task());
        let delay = delay_ms.min(i32::MAX as u32) as i32;
        match self
            .win
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => TimerId(handle as i64),
            Err(err) => {
                tracing::error!("setTimeout failed: {err:?}");
                TimerId(-1)
            }
        }
    }

    fn cancel(&self, id: TimerId) {
        if id.0 >= 0 {
            self.win.clear_timeout_with_handle(id.0 as i32);
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Call `frame` with the frame timestamp on every animation frame until it
/// returns false.
pub fn animation_frames(win: &Window, mut frame: impl FnMut(f64) -> bool + 'static) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let w = win.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if !frame(ts) {
            // breaks the self-reference so the closure is freed
            let _ = f.borrow_mut().take();
            return;
        }
        if let Some(cb) = f.borrow().as_ref() {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = g.borrow().as_ref() {
        let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
