//! Signal Conditioner
//!
//! Macht aus verrauschten 12-Bit Poti-Messungen stabile 8-Bit Werte:
//! Median aus drei Messungen, invertierte Skalierung, EMA-Glättung.

use crate::config::SmoothingWeights;
use crate::logic::{ema_step, median3, to_8bit_inverted};
use crate::traits::AnalogInput;
use crate::types::{Channel, KnobReadings};

/// Glättungszustand eines Kanals
///
/// Die erste Messung setzt den Zustand direkt, danach greift der EMA.
/// Ein eigenes `initialized` Flag statt eines Sentinel-Werts sorgt dafür,
/// dass ein echter Wert 0 den Filter nicht neu startet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmoothingFilter {
    value: u8,
    initialized: bool,
}

impl SmoothingFilter {
    pub const fn new() -> Self {
        Self {
            value: 0,
            initialized: false,
        }
    }

    pub fn apply(&mut self, sample: u8, weights: SmoothingWeights) -> u8 {
        if !self.initialized {
            self.value = sample;
            self.initialized = true;
        }
        self.value = ema_step(self.value, sample, weights);
        self.value
    }

    /// Aktueller geglätteter Wert, `None` vor der ersten Messung
    pub const fn value(&self) -> Option<u8> {
        if self.initialized {
            Some(self.value)
        } else {
            None
        }
    }
}

/// Konditionierung aller fünf Kanäle
///
/// Besitzt exklusiv die Glättungszustände; sie werden zwischen Ticks
/// nicht zurückgesetzt.
#[derive(Debug, Clone)]
pub struct SignalConditioner {
    filters: [SmoothingFilter; Channel::ALL.len()],
    weights: SmoothingWeights,
}

impl SignalConditioner {
    pub const fn new(weights: SmoothingWeights) -> Self {
        Self {
            filters: [SmoothingFilter::new(); Channel::ALL.len()],
            weights,
        }
    }

    /// Liest einen Kanal dreimal und liefert den geglätteten Wert (0-255)
    pub fn condition<A: AnalogInput>(&mut self, input: &mut A, channel: Channel) -> u8 {
        let a = input.read(channel);
        let b = input.read(channel);
        let c = input.read(channel);
        let sample = to_8bit_inverted(median3(a, b, c));
        self.filters[channel.index()].apply(sample, self.weights)
    }

    /// Konditioniert alle Kanäle in fester Reihenfolge
    pub fn condition_all<A: AnalogInput>(&mut self, input: &mut A) -> KnobReadings {
        let mut knobs = KnobReadings::default();
        for channel in Channel::ALL {
            knobs.set(channel, self.condition(input, channel));
        }
        knobs
    }

    pub fn filter(&self, channel: Channel) -> &SmoothingFilter {
        &self.filters[channel.index()]
    }
}

impl Default for SignalConditioner {
    fn default() -> Self {
        Self::new(SmoothingWeights::default())
    }
}
