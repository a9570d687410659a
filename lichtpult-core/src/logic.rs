//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use crate::config::SmoothingWeights;
use crate::types::{ColorVector, KnobReadings};

/// Größter Rohwert des 12-Bit ADC
pub const ADC_MAX: u16 = 4095;

/// Median aus drei Messwerten (festes Sortier-Netzwerk)
///
/// Verwirft einzelne Ausreißer ohne Puffer.
///
/// # Beispiele
///
/// ```
/// # use lichtpult_core::median3;
/// assert_eq!(median3(4095, 100, 110), 110);
/// assert_eq!(median3(7, 7, 0), 7);
/// ```
pub fn median3(mut a: u16, mut b: u16, mut c: u16) -> u16 {
    if a > b {
        core::mem::swap(&mut a, &mut b);
    }
    if b > c {
        core::mem::swap(&mut b, &mut c);
    }
    if a > b {
        core::mem::swap(&mut a, &mut b);
    }
    b
}

/// Skaliert einen 12-Bit Rohwert invertiert auf 0-255
///
/// Die Potis sind verkehrt herum verdrahtet: Rohwert 0 ist Vollausschlag.
/// Werte über `ADC_MAX` werden begrenzt.
///
/// ```
/// # use lichtpult_core::to_8bit_inverted;
/// assert_eq!(to_8bit_inverted(0), 255);
/// assert_eq!(to_8bit_inverted(4095), 0);
/// assert_eq!(to_8bit_inverted(2048), 128);
/// ```
pub fn to_8bit_inverted(raw: u16) -> u8 {
    let raw = u32::from(raw.min(ADC_MAX));
    let scaled = raw * 255 / u32::from(ADC_MAX);
    255 - scaled as u8
}

/// Ein Schritt des exponentiellen gleitenden Mittels (Integer, abschneidend)
pub fn ema_step(state: u8, sample: u8, weights: SmoothingWeights) -> u8 {
    let den = u32::from(weights.denominator.max(1));
    let num = u32::from(weights.numerator).min(den);
    let next = (u32::from(state) * (den - num) + u32::from(sample) * num) / den;
    // Konvexe Kombination zweier u8-Werte bleibt in 0..=255
    next as u8
}

/// Skaliert die vier Farbkanäle mit der Helligkeit (0.0-1.0)
pub fn scale_by_brightness(knobs: &KnobReadings) -> ColorVector {
    let factor = f32::from(knobs.brightness) / 255.0;
    let scale = |value: u8| (f32::from(value) * factor) as u8;
    ColorVector::new(
        scale(knobs.red),
        scale(knobs.green),
        scale(knobs.blue),
        scale(knobs.white),
    )
}

/// Helligkeit in Prozent (0-100)
pub fn brightness_percent(brightness: u8) -> u8 {
    (u32::from(brightness) * 100 / 255) as u8
}

/// Proportionale Balkenhöhe für einen Prozentwert
pub fn bar_fill(percent: u8, height: u32) -> u32 {
    u32::from(percent.min(100)) * height / 100
}
