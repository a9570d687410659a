//! Change Detector
//!
//! Entscheidet per Hysterese, ob sich die Potis seit der letzten
//! Übernahme weit genug bewegt haben, um die Strips neu zu schreiben.

use crate::types::{Channel, KnobReadings};

/// Prüft einen Kandidaten gegen den zuletzt übernommenen Stand.
///
/// `true` wenn noch nie übernommen wurde oder mindestens ein Kanal um
/// `threshold` oder mehr abweicht.
pub fn should_actuate(candidate: &KnobReadings, committed: Option<&KnobReadings>, threshold: u8) -> bool {
    let Some(committed) = committed else {
        return true;
    };
    Channel::ALL
        .iter()
        .any(|&channel| candidate.get(channel).abs_diff(committed.get(channel)) >= threshold)
}

/// Hält den übernommenen Stand (`LastCommitted`)
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    committed: Option<KnobReadings>,
    threshold: u8,
}

impl ChangeDetector {
    pub const fn new(threshold: u8) -> Self {
        Self {
            committed: None,
            threshold,
        }
    }

    /// Übernimmt den Kandidaten komplett, falls er als Änderung zählt
    pub fn evaluate(&mut self, candidate: KnobReadings) -> bool {
        let changed = should_actuate(&candidate, self.committed.as_ref(), self.threshold);
        if changed {
            self.committed = Some(candidate);
        }
        changed
    }

    pub const fn committed(&self) -> Option<&KnobReadings> {
        self.committed.as_ref()
    }
}
