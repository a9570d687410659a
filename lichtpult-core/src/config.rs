//! Laufzeit-Konfiguration der Steuerschleife
//!
//! Die Firmware baut ihre `ConsoleConfig` zur Compile-Zeit (siehe
//! `lichtpult-firmware/src/config.rs`). Mit dem `serde` Feature kann sie
//! auch aus JSON o.ä. geladen werden.

use crate::types::{ButtonPolicy, MAX_BUTTONS, MAX_OUTPUTS};

/// Entprell-Zeit der Taster in Millisekunden
pub const DEFAULT_DEBOUNCE_MS: u32 = 40;

/// Mindestabstand (in 8-Bit Einheiten) ab dem ein Kanal als geändert gilt
pub const DEFAULT_HYSTERESIS: u8 = 2;

/// Pause zwischen zwei Ticks in Millisekunden
pub const DEFAULT_TICK_MS: u32 = 2;

/// Periodisches Neuzeichnen der Statusanzeige
pub const DEFAULT_STATUS_REFRESH_MS: u32 = 1000;

/// Wie lange `MODE n` stehen bleibt
pub const DEFAULT_MODE_DWELL_MS: u32 = 1500;

/// Dauer einer Blink-Phase der Quittierung (an bzw. aus)
pub const DEFAULT_FLASH_MS: u32 = 150;

/// LEDs pro Strip
pub const DEFAULT_PIXELS_PER_OUTPUT: u16 = 50;

/// Gewichtung des EMA-Filters: `numerator/denominator` auf den neuen Wert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothingWeights {
    pub numerator: u8,
    pub denominator: u8,
}

impl SmoothingWeights {
    pub const fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl Default for SmoothingWeights {
    fn default() -> Self {
        Self::new(2, 10)
    }
}

/// Konfiguration eines Pult-Deployments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsoleConfig {
    pub policy: ButtonPolicy,
    /// Anzahl LED-Ausgänge (1..=4)
    pub outputs: u8,
    /// Anzahl Taster (1..=4)
    pub buttons: u8,
    pub pixels_per_output: u16,
    pub debounce_ms: u32,
    pub hysteresis: u8,
    pub smoothing: SmoothingWeights,
    pub tick_ms: u32,
    pub status_refresh_ms: u32,
    pub mode_dwell_ms: u32,
    pub flash_on_ms: u32,
    pub flash_off_ms: u32,
    /// Pegel aller vier Kanäle während einer Quittierungs-Phase
    pub flash_level: u8,
}

impl ConsoleConfig {
    /// Vier Strips, Taster schalten die Auswahl um
    pub const fn multi_select() -> Self {
        Self {
            policy: ButtonPolicy::Toggle,
            outputs: MAX_OUTPUTS as u8,
            buttons: MAX_BUTTONS as u8,
            pixels_per_output: DEFAULT_PIXELS_PER_OUTPUT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            hysteresis: DEFAULT_HYSTERESIS,
            smoothing: SmoothingWeights::new(2, 10),
            tick_ms: DEFAULT_TICK_MS,
            status_refresh_ms: DEFAULT_STATUS_REFRESH_MS,
            mode_dwell_ms: DEFAULT_MODE_DWELL_MS,
            flash_on_ms: DEFAULT_FLASH_MS,
            flash_off_ms: DEFAULT_FLASH_MS,
            flash_level: 255,
        }
    }

    /// Ein Strip, Taster lösen Modi aus
    pub const fn single_trigger() -> Self {
        let mut config = Self::multi_select();
        config.policy = ButtonPolicy::Momentary;
        config.outputs = 1;
        config
    }

    pub const fn with_outputs(mut self, outputs: u8) -> Self {
        self.outputs = outputs;
        self
    }

    pub const fn with_buttons(mut self, buttons: u8) -> Self {
        self.buttons = buttons;
        self
    }

    pub const fn with_pixels_per_output(mut self, pixels: u16) -> Self {
        self.pixels_per_output = pixels;
        self
    }

    pub const fn with_status_refresh_ms(mut self, refresh_ms: u32) -> Self {
        self.status_refresh_ms = refresh_ms;
        self
    }

    pub const fn with_mode_dwell_ms(mut self, dwell_ms: u32) -> Self {
        self.mode_dwell_ms = dwell_ms;
        self
    }

    pub const fn with_flash_ms(mut self, on_ms: u32, off_ms: u32) -> Self {
        self.flash_on_ms = on_ms;
        self.flash_off_ms = off_ms;
        self
    }

    /// Begrenzt Zähler und Filter-Gewichte auf gültige Bereiche
    pub fn validated(mut self) -> Self {
        self.outputs = self.outputs.clamp(1, MAX_OUTPUTS as u8);
        self.buttons = self.buttons.clamp(1, MAX_BUTTONS as u8);
        self.smoothing.denominator = self.smoothing.denominator.max(1);
        self.smoothing.numerator = self.smoothing.numerator.min(self.smoothing.denominator);
        self
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::multi_select()
    }
}
