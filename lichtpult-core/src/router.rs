//! Output Router
//!
//! Schreibt Farben auf genau die ausgewählten Ausgänge: jedes Pixel
//! gleich (Vollfläche), danach ein `flush` pro Ausgang.

use embedded_hal::delay::DelayNs;

use crate::traits::{LedError, LightOutput};
use crate::types::{ColorVector, OutputSelection};

/// Parameter der Quittierungs-Blinkfolge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub count: u8,
    pub color: ColorVector,
    pub on_ms: u32,
    pub off_ms: u32,
}

impl Pulse {
    /// Maximale Blockierzeit der Blinkfolge
    pub const fn duration_ms(&self) -> u32 {
        self.count as u32 * (self.on_ms + self.off_ms)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OutputRouter {
    outputs: usize,
    pixels_per_output: usize,
}

impl OutputRouter {
    pub const fn new(outputs: usize, pixels_per_output: usize) -> Self {
        Self {
            outputs,
            pixels_per_output,
        }
    }

    /// Füllt einen Ausgang komplett mit einer Farbe und sendet ihn
    pub fn fill<L: LightOutput>(&self, light: &mut L, output: usize, color: ColorVector) -> Result<(), LedError> {
        for index in 0..self.pixels_per_output {
            light.set_pixel(output, index, color);
        }
        light.flush(output)
    }

    /// Schreibt `color` auf alle ausgewählten Ausgänge und keine anderen.
    ///
    /// Gibt die Anzahl erfolgreich geschriebener Ausgänge zurück. Fehler
    /// werden geloggt, nicht wiederholt.
    pub fn actuate<L: LightOutput>(&self, light: &mut L, color: ColorVector, selection: OutputSelection) -> usize {
        let mut written = 0;
        for output in selection.iter().filter(|&output| output < self.outputs) {
            match self.fill(light, output, color) {
                Ok(()) => written += 1,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Failed to write output {}: {}", output + 1, _e);
                }
            }
        }
        written
    }

    /// Quittierung: blinkt `pulse.count` mal auf einem Ausgang und stellt
    /// danach `restore` wieder her.
    ///
    /// Blockiert für `pulse.duration_ms()`. In dieser Zeit werden weder
    /// Taster noch Potis gelesen; die Blinkfolge läuft immer vollständig,
    /// auch wenn ein Schreibvorgang fehlschlägt (der erste Fehler wird
    /// zurückgegeben).
    pub fn acknowledge<L: LightOutput, D: DelayNs>(
        &self,
        light: &mut L,
        delay: &mut D,
        output: usize,
        pulse: Pulse,
        restore: ColorVector,
    ) -> Result<(), LedError> {
        let mut result = Ok(());
        for _ in 0..pulse.count {
            result = result.and(self.fill(light, output, pulse.color));
            delay.delay_ms(pulse.on_ms);
            result = result.and(self.fill(light, output, ColorVector::BLACK));
            delay.delay_ms(pulse.off_ms);
        }
        result.and(self.fill(light, output, restore))
    }

    /// Schaltet alle Ausgänge aus (Startzustand)
    pub fn clear_all<L: LightOutput>(&self, light: &mut L) -> usize {
        self.actuate(light, ColorVector::BLACK, OutputSelection::all(self.outputs))
    }
}

// ============================================================================
// Tests
// ============================================================================
