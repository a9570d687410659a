//! Status-Aktualisierung
//!
//! Entscheidet, wann die Statusanzeige neu gezeichnet wird: sofort nach
//! zustandsändernden Ereignissen, sonst im festen Refresh-Intervall.
//! Eine Modus-Anzeige läuft über eine Deadline gegen die monotone Uhr ab.

use crate::types::{Overview, StatusView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ModeIndicator {
    number: u8,
    until_ms: u64,
}

#[derive(Debug, Clone)]
pub struct StatusScheduler {
    refresh_ms: u32,
    dwell_ms: u32,
    dirty: bool,
    last_render_ms: Option<u64>,
    mode: Option<ModeIndicator>,
}

impl StatusScheduler {
    pub const fn new(refresh_ms: u32, dwell_ms: u32) -> Self {
        Self {
            refresh_ms,
            dwell_ms,
            dirty: true,
            last_render_ms: None,
            mode: None,
        }
    }

    /// Erzwingt ein Neuzeichnen im nächsten `next_view`
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Zeigt `MODE number` bis `now_ms + dwell`, unabhängig von weiteren Eingaben
    pub fn show_mode(&mut self, number: u8, now_ms: u64) {
        self.mode = Some(ModeIndicator {
            number,
            until_ms: now_ms + u64::from(self.dwell_ms),
        });
        self.dirty = true;
    }

    pub fn active_mode(&self) -> Option<u8> {
        self.mode.map(|mode| mode.number)
    }

    /// Liefert die zu zeichnende Ansicht, falls ein Neuzeichnen fällig ist
    pub fn next_view(&mut self, now_ms: u64, overview: Overview) -> Option<StatusView> {
        if let Some(mode) = self.mode {
            if now_ms >= mode.until_ms {
                self.mode = None;
                self.dirty = true;
            }
        }

        let refresh_due = self
            .last_render_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= u64::from(self.refresh_ms));
        if !self.dirty && !refresh_due {
            return None;
        }

        self.dirty = false;
        self.last_render_ms = Some(now_ms);
        Some(match self.mode {
            Some(mode) => StatusView::Mode(mode.number),
            None => StatusView::Overview(overview),
        })
    }
}
