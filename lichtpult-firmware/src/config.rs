// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use lichtpult_core::ConsoleConfig;

// ============================================================================
// LED-Strip Konfiguration
// ============================================================================

/// GPIO-Pins der vier SK6812 RGBW Strips (Ausgang 1-4)
pub const STRIP_GPIO_PINS: [u8; 4] = [18, 4, 17, 13];

/// Anzahl der LEDs pro Strip
pub const LED_COUNT: usize = 50;

/// RMT-Puls-Puffer pro Strip: 32 Bit (GRBW) pro LED + 1 End-Marker
pub const STRIP_BUFFER_SIZE: usize = LED_COUNT * 32 + 1;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812/SK6812 Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// Potentiometer (ADC, 12 Bit)
// ============================================================================

/// Poti-Pins: Rot, Grün, Blau, Weiß (ADC1) und Helligkeit (ADC2)
pub const POT_GPIO_PINS: [u8; 5] = [32, 35, 34, 33, 27];

// ============================================================================
// Taster
// ============================================================================

/// Taster-Pins (active-high, interner Pulldown)
pub const BUTTON_GPIO_PINS: [u8; 4] = [23, 22, 21, 19];

// ============================================================================
// OLED Statusanzeigen
// ============================================================================

/// Linke Anzeige (Auswahl + Kanäle): SDA, SCL
pub const OLED_LEFT_PINS: (u8, u8) = (25, 26);

/// Rechte Anzeige (Helligkeit): SDA, SCL
pub const OLED_RIGHT_PINS: (u8, u8) = (14, 16);

/// I²C Bus-Frequenz in kHz
pub const OLED_I2C_KHZ: u32 = 400;

/// Höhe des Helligkeitsbalkens in Pixeln
pub const BRIGHTNESS_BAR_HEIGHT: u32 = 40;

// ============================================================================
// Steuerschleife
// ============================================================================

/// Konfiguration der Steuerschleife, Variante per Cargo-Feature
#[cfg(not(feature = "single-trigger"))]
pub const CONSOLE_CONFIG: ConsoleConfig =
    ConsoleConfig::multi_select().with_pixels_per_output(LED_COUNT as u16);

#[cfg(feature = "single-trigger")]
pub const CONSOLE_CONFIG: ConsoleConfig = ConsoleConfig::single_trigger()
    .with_pixels_per_output(LED_COUNT as u16)
    .with_flash_ms(150, 150);
