//! Contact form: simulated submission and floating labels.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::FormTiming;
use crate::notify::{NotificationKind, Notifier};
use crate::schedule::SharedScheduler;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";

/// Submit button stage. `Idle -> Pending -> Sent -> Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitStage {
    Idle,
    Pending,
    Sent,
}

impl SubmitStage {
    /// Button label markup for the stage; `None` restores the idle label.
    pub fn label_html(self) -> Option<&'static str> {
        match self {
            SubmitStage::Idle => None,
            SubmitStage::Pending => Some(r#"<i class="fas fa-spinner fa-spin"></i> Sending..."#),
            SubmitStage::Sent => Some(r#"<i class="fas fa-check"></i> Message Sent!"#),
        }
    }

    pub fn disables_submit(self) -> bool {
        self != SubmitStage::Idle
    }
}

pub trait SubmitSurface {
    fn show_stage(&self, stage: SubmitStage);
    fn reset_fields(&self);
}

#[derive(Clone)]
pub struct ContactForm {
    scheduler: SharedScheduler,
    timing: FormTiming,
    surface: Rc<dyn SubmitSurface>,
    notifier: Notifier,
    stage: Rc<Cell<SubmitStage>>,
}

impl ContactForm {
    pub fn new(
        scheduler: SharedScheduler,
        timing: FormTiming,
        surface: Rc<dyn SubmitSurface>,
        notifier: Notifier,
    ) -> Self {
        Self {
            scheduler,
            timing,
            surface,
            notifier,
            stage: Rc::new(Cell::new(SubmitStage::Idle)),
        }
    }

    pub fn stage(&self) -> SubmitStage {
        self.stage.get()
    }

    /// Start the simulated send. Returns false (and does nothing) while a
    /// previous submission is still in flight.
    pub fn submit(&self) -> bool {
        if self.stage.get() != SubmitStage::Idle {
            return false;
        }
        self.enter(SubmitStage::Pending);

        let form = self.clone();
        self.scheduler.schedule(
            self.timing.pending_ms,
            Box::new(move || {
                form.enter(SubmitStage::Sent);
                let done = form.clone();
                form.scheduler.schedule(
                    form.timing.success_ms,
                    Box::new(move || {
                        done.enter(SubmitStage::Idle);
                        done.surface.reset_fields();
                        done.notifier
                            .show(SUCCESS_MESSAGE, NotificationKind::Success);
                    }),
                );
            }),
        );
        true
    }

    fn enter(&self, stage: SubmitStage) {
        tracing::debug!("contact form: {:?} -> {:?}", self.stage.get(), stage);
        self.stage.set(stage);
        self.surface.show_stage(stage);
    }
}

/// Where a field's label sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPose {
    Raised,
    Resting,
}

pub fn label_on_focus() -> LabelPose {
    LabelPose::Raised
}

/// Labels only drop back when the field was left empty.
pub fn label_on_blur(value: &str) -> Option<LabelPose> {
    value.is_empty().then_some(LabelPose::Resting)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_labels() {
        let label = |stage: SubmitStage| stage.label_html().unwrap_or_default();
        assert!(label(SubmitStage::Pending).contains("Sending"));
        assert!(label(SubmitStage::Sent).contains("Message Sent!"));
        assert_eq!(SubmitStage::Idle.label_html(), None);
        assert!(SubmitStage::Sent.disables_submit());
        assert!(!SubmitStage::Idle.disables_submit());
    }

    #[test]
    fn blur_keeps_label_raised_when_filled() {
        assert_eq!(label_on_focus(), LabelPose::Raised);
        assert_eq!(label_on_blur(""), Some(LabelPose::Resting));
        assert_eq!(label_on_blur("hi"), None);
    }
}
