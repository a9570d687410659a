//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.
//!
//! # Implementierungen
//! - **Production:** ADC, GPIO, RMT und SSD1306 Treiber in `lichtpult-firmware`
//! - **Testing:** In-Memory Mocks in `lichtpult-tests`

use embedded_hal::digital::InputPin;

use crate::types::{Channel, ColorVector, StatusView};

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Fehler-Typ für die Statusanzeige
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Keine Anzeige angeschlossen (Init beim Start fehlgeschlagen)
    NotPresent,
    RenderFailed,
}

/// Analoge Eingänge (Potentiometer)
pub trait AnalogInput {
    /// Liest einen 12-Bit Rohwert (0-4095)
    ///
    /// Muss in jedem Tick aufrufbar sein. Rauschen ist erlaubt,
    /// ein Lesefehler nicht - der Treiber liefert immer einen Wert.
    fn read(&mut self, channel: Channel) -> u16;
}

/// Digitale Taster-Eingänge (active-high, Ruhepegel low)
pub trait ButtonInput {
    /// Gibt `true` zurück solange der Taster gedrückt ist
    fn is_pressed(&mut self, button: usize) -> bool;
}

/// Ein Array aus `embedded-hal` Pins ist direkt eine Taster-Bank.
///
/// Lesefehler und unbekannte Indizes zählen als "nicht gedrückt".
impl<P: InputPin, const N: usize> ButtonInput for [P; N] {
    fn is_pressed(&mut self, button: usize) -> bool {
        self.get_mut(button)
            .is_some_and(|pin| pin.is_high().unwrap_or(false))
    }
}

/// LED-Ausgänge (RGBW Strips)
pub trait LightOutput {
    /// Setzt ein Pixel im Puffer des Ausgangs (ohne zu senden)
    fn set_pixel(&mut self, output: usize, index: usize, color: ColorVector);

    /// Überträgt den Puffer eines Ausgangs auf die Hardware
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn flush(&mut self, output: usize) -> Result<(), LedError>;
}

/// Statusanzeige
pub trait StatusDisplay {
    /// Zeichnet eine Projektion. Mehrfaches Zeichnen derselben Ansicht
    /// muss dasselbe Bild ergeben.
    fn render(&mut self, view: &StatusView) -> Result<(), DisplayError>;
}

/// Monotone Uhr in Millisekunden (nie Wanduhr-Zeit)
pub trait MonotonicClock {
    fn now_ms(&self) -> u64;
}
