//! Transient toast notifications.
//!
//! Each toast runs its own timers: slide in shortly after mounting, dwell,
//! slide out, then unmount once the exit transition has finished. Toasts are
//! independent; nothing stacks or deduplicates them.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::NotificationTiming;
use crate::schedule::SharedScheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
}

impl NotificationKind {
    /// Anything other than `"success"` is informational.
    pub fn parse(kind: &str) -> Self {
        if kind == "success" {
            Self::Success
        } else {
            Self::Info
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
        }
    }

    /// Icon font class.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Info => "fas fa-info-circle",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "#00ff88",
            Self::Info => "#0080ff",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

/// Rendering side of the notifier.
pub trait NotificationHost {
    /// Insert the toast off-screen.
    fn mount(&self, id: NotificationId, message: &str, kind: NotificationKind);
    fn slide_in(&self, id: NotificationId);
    fn slide_out(&self, id: NotificationId);
    fn unmount(&self, id: NotificationId);
}

#[derive(Clone)]
pub struct Notifier {
    scheduler: SharedScheduler,
    host: Rc<dyn NotificationHost>,
    timing: NotificationTiming,
    next_id: Rc<Cell<u64>>,
}

impl Notifier {
    pub fn new(
        scheduler: SharedScheduler,
        host: Rc<dyn NotificationHost>,
        timing: NotificationTiming,
    ) -> Self {
        Self {
            scheduler,
            host,
            timing,
            next_id: Rc::new(Cell::new(0)),
        }
    }

    pub fn show(&self, message: &str, kind: NotificationKind) -> NotificationId {
        let id = NotificationId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        tracing::debug!("notification {} ({}): {message}", id.0, kind.as_str());
        self.host.mount(id, message, kind);

        let host = self.host.clone();
        self.scheduler.schedule(self.timing.enter_delay_ms, Box::new(move || host.slide_in(id)));

        let host = self.host.clone();
        let scheduler = self.scheduler.clone();
        let exit_ms = self.timing.exit_ms;
        self.scheduler.schedule(
            self.timing.dwell_ms,
            Box::new(move || {
                host.slide_out(id);
                scheduler.schedule(exit_ms, Box::new(move || host.unmount(id)));
            }),
        );
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kinds_are_info() {
        assert_eq!(NotificationKind::parse("success"), NotificationKind::Success);
        assert_eq!(NotificationKind::parse("warning"), NotificationKind::Info);
        assert_eq!(NotificationKind::Info.icon(), "fas fa-info-circle");
    }
}
