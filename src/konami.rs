//! Konami-code detector over `KeyboardEvent.code` values.

use std::collections::VecDeque;

pub const KONAMI: [&str; 10] = [
    "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight", "ArrowLeft",
    "ArrowRight", "KeyB", "KeyA",
];

pub const EASTER_EGG_MESSAGE: &str = "Matrix mode activated! 🕶️";

/// Keeps the last `trigger.len()` codes and reports an exact ordered match.
#[derive(Clone, Debug)]
pub struct SequenceDetector {
    trigger: &'static [&'static str],
    recent: VecDeque<String>,
}

impl SequenceDetector {
    pub fn new(trigger: &'static [&'static str]) -> Self {
        Self {
            trigger,
            recent: VecDeque::with_capacity(trigger.len()),
        }
    }

    pub fn konami() -> Self {
        Self::new(&KONAMI)
    }

    /// Feed one key. True when the window now equals the trigger. The window
    /// keeps rolling after a match, so the sequence can fire again.
    pub fn push(&mut self, code: &str) -> bool {
        if self.trigger.is_empty() {
            return false;
        }
        if self.recent.len() == self.trigger.len() {
            self.recent.pop_front();
        }
        self.recent.push_back(code.to_string());
        self.recent.len() == self.trigger.len()
            && self
                .recent
                .iter()
                .zip(self.trigger)
                .all(|(seen, want)| seen.as_str() == *want)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_sequence_fires_on_last_key() {
        let mut d = SequenceDetector::konami();
        let fired: Vec<bool> = KONAMI.iter().map(|k| d.push(k)).collect();
        assert_eq!(fired.iter().filter(|f| **f).count(), 1);
        assert!(fired[9]);
    }

    #[test]
    fn leading_noise_is_ignored() {
        let mut d = SequenceDetector::konami();
        for k in ["KeyX", "ArrowUp", "Enter"] {
            assert!(!d.push(k));
        }
        assert!(KONAMI.iter().map(|k| d.push(k)).last().unwrap());
    }

    #[test]
    fn empty_trigger_never_fires() {
        let mut d = SequenceDetector::new(&[]);
        assert!(!d.push("KeyA"));
    }
}
