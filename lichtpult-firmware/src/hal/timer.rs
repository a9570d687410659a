// Zeitbasis der Steuerschleife
//
// Die Uhr kommt von embassy-time (läuft ab Boot), die blockierenden
// Pausen der Blinkfolge vom esp-hal Delay.

use embedded_hal::delay::DelayNs;
use esp_hal::delay::Delay;
use lichtpult_core::MonotonicClock;

/// Monotone Uhr + blockierende Pause
#[derive(Clone, Copy)]
pub struct SystemTimer {
    delay: Delay,
}

impl SystemTimer {
    pub fn new() -> Self {
        Self {
            delay: Delay::new(),
        }
    }
}

impl Default for SystemTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for SystemTimer {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}

impl DelayNs for SystemTimer {
    fn delay_ns(&mut self, ns: u32) {
        self.delay.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
