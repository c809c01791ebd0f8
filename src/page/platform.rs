//! Browser platform hooks: paint timing and service worker registration.

use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Event, PerformanceEntry, PerformanceObserver, PerformanceObserverEntryList};

use crate::error::Result;

use super::PageContext;
use super::dom::{self, listen};

const LCP_ENTRY: &str = "largest-contentful-paint";
const SERVICE_WORKER_URL: &str = "/sw.js";

pub fn install(ctx: &Rc<PageContext>) -> Result<()> {
    if dom::has_property(&js_sys::global(), "PerformanceObserver") {
        observe_paint()?;
    }
    if dom::has_property(&ctx.win.navigator(), "serviceWorker") {
        let win = ctx.win.clone();
        listen(&ctx.win, "load", move |_: Event| {
            let container = win.navigator().service_worker();
            let registration = JsFuture::from(container.register(SERVICE_WORKER_URL));
            spawn_local(async move {
                match registration.await {
                    Ok(_) => tracing::info!("service worker registered"),
                    Err(err) => tracing::warn!("service worker registration failed: {err:?}"),
                }
            });
        })?;
    }
    Ok(())
}

fn observe_paint() -> Result<()> {
    let callback = Closure::wrap(Box::new(|list: PerformanceObserverEntryList| {
        for entry in list.get_entries().iter() {
            let Ok(entry) = entry.dyn_into::<PerformanceEntry>() else {
                continue;
            };
            if entry.entry_type() == LCP_ENTRY {
                tracing::info!("LCP: {:.0}ms", entry.start_time());
            }
        }
    }) as Box<dyn FnMut(PerformanceObserverEntryList)>);
    let observer = PerformanceObserver::new(callback.as_ref().unchecked_ref())?;
    callback.forget();

    let types = Array::of1(&JsValue::from_str(LCP_ENTRY));
    let opts = dom::options(&[("entryTypes", types.into())]);
    observer.observe(opts.unchecked_ref());
    Ok(())
}
