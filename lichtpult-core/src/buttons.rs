//! Button State Tracker
//!
//! Zeitbasiertes Entprellen per Pegelvergleich: ein neuer Pegel wird nur
//! übernommen, wenn seit der letzten akzeptierten Flanke mindestens die
//! Entprell-Zeit vergangen ist.

use heapless::Vec;

use crate::traits::ButtonInput;
use crate::types::{ButtonAction, ButtonEvent, ButtonPolicy, Edge, MAX_BUTTONS};

/// Entprell-Zustand eines Tasters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    level: bool,
    last_change_ms: u64,
    debounce_ms: u32,
}

impl Debouncer {
    /// Startet im Zustand "losgelassen" mit Zeitstempel 0
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            level: false,
            last_change_ms: 0,
            debounce_ms,
        }
    }

    /// Verarbeitet den aktuellen Pegel; gibt eine akzeptierte Flanke zurück
    pub fn update(&mut self, level: bool, now_ms: u64) -> Option<Edge> {
        if level == self.level {
            return None;
        }
        if now_ms.saturating_sub(self.last_change_ms) < u64::from(self.debounce_ms) {
            return None;
        }

        self.level = level;
        self.last_change_ms = now_ms;
        Some(if level { Edge::Rising } else { Edge::Falling })
    }

    pub const fn is_pressed(&self) -> bool {
        self.level
    }
}

/// Alle Taster eines Pults mit gemeinsamer Policy
#[derive(Debug, Clone)]
pub struct ButtonBank {
    debouncers: [Debouncer; MAX_BUTTONS],
    count: usize,
    policy: ButtonPolicy,
}

impl ButtonBank {
    pub fn new(count: usize, debounce_ms: u32, policy: ButtonPolicy) -> Self {
        Self {
            debouncers: [Debouncer::new(debounce_ms); MAX_BUTTONS],
            count: count.min(MAX_BUTTONS),
            policy,
        }
    }

    pub const fn policy(&self) -> ButtonPolicy {
        self.policy
    }

    /// Liest alle Taster und liefert die akzeptierten Flanken
    pub fn poll<B: ButtonInput>(&mut self, input: &mut B, now_ms: u64) -> Vec<ButtonEvent, MAX_BUTTONS> {
        let mut events = Vec::new();
        for (button, debouncer) in self.debouncers.iter_mut().enumerate().take(self.count) {
            if let Some(edge) = debouncer.update(input.is_pressed(button), now_ms) {
                // Höchstens ein Event pro Taster, passt immer
                let _ = events.push(ButtonEvent { button, edge });
            }
        }
        events
    }

    /// Wie `poll`, aber bereits auf Aktionen der Policy abgebildet.
    ///
    /// Fallende Flanken werden nur intern vermerkt.
    pub fn poll_actions<B: ButtonInput>(
        &mut self,
        input: &mut B,
        now_ms: u64,
    ) -> Vec<ButtonAction, MAX_BUTTONS> {
        self.poll(input, now_ms)
            .into_iter()
            .filter_map(|event| self.action_for(event))
            .collect()
    }

    pub fn action_for(&self, event: ButtonEvent) -> Option<ButtonAction> {
        if event.edge != Edge::Rising {
            return None;
        }
        Some(match self.policy {
            ButtonPolicy::Toggle => ButtonAction::ToggleOutput(event.button),
            ButtonPolicy::Momentary => ButtonAction::TriggerMode(event.button as u8 + 1),
        })
    }

    pub fn is_pressed(&self, button: usize) -> bool {
        self.debouncers
            .get(button)
            .is_some_and(Debouncer::is_pressed)
    }
}
