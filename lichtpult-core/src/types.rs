//! Core Types für das Lichtpult
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt::Write;

use heapless::String;
use rgb::RGB8;

use crate::logic::{bar_fill, brightness_percent, scale_by_brightness};

/// Maximale Anzahl adressierbarer LED-Ausgänge (Strips)
pub const MAX_OUTPUTS: usize = 4;

/// Maximale Anzahl Taster
pub const MAX_BUTTONS: usize = 4;

/// Analoger Kanal (ein Potentiometer)
///
/// Die vier Farbkanäle plus Helligkeit als fünfter Kanal gleicher Form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    Red,
    Green,
    Blue,
    White,
    Brightness,
}

impl Channel {
    /// Alle Kanäle in Abtast-Reihenfolge
    pub const ALL: [Channel; 5] = [
        Channel::Red,
        Channel::Green,
        Channel::Blue,
        Channel::White,
        Channel::Brightness,
    ];

    /// Die vier Farbkanäle (ohne Helligkeit)
    pub const COLOR: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::White];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Kurzbezeichnung für die Statusanzeige
    pub const fn label(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
            Channel::White => "W",
            Channel::Brightness => "BR",
        }
    }
}

/// Konditionierte Potentiometer-Werte (0-255) eines Ticks
///
/// Das ist der Vektor, den der Change Detector gegen den zuletzt
/// übernommenen Stand vergleicht.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnobReadings {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub white: u8,
    pub brightness: u8,
}

impl KnobReadings {
    pub const fn new(red: u8, green: u8, blue: u8, white: u8, brightness: u8) -> Self {
        Self {
            red,
            green,
            blue,
            white,
            brightness,
        }
    }

    pub const fn get(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
            Channel::White => self.white,
            Channel::Brightness => self.brightness,
        }
    }

    pub fn set(&mut self, channel: Channel, value: u8) {
        match channel {
            Channel::Red => self.red = value,
            Channel::Green => self.green = value,
            Channel::Blue => self.blue = value,
            Channel::White => self.white = value,
            Channel::Brightness => self.brightness = value,
        }
    }

    /// Farbe nach Helligkeits-Skalierung (das, was auf die Strips geht)
    pub fn color(&self) -> ColorVector {
        scale_by_brightness(self)
    }
}

/// RGBW-Farbe wie sie auf einen Ausgang geschrieben wird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorVector {
    pub rgb: RGB8,
    pub white: u8,
}

impl ColorVector {
    pub const BLACK: ColorVector = ColorVector::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self {
            rgb: RGB8 { r, g, b },
            white: w,
        }
    }

    /// Gleicher Wert auf allen vier Kanälen
    pub const fn uniform(level: u8) -> Self {
        Self::new(level, level, level, level)
    }
}

/// Menge der ausgewählten Ausgänge (Bitmaske, Kapazität `MAX_OUTPUTS`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputSelection(u8);

impl OutputSelection {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Alle Ausgänge `0..count` ausgewählt
    pub const fn all(count: usize) -> Self {
        let count = if count > MAX_OUTPUTS { MAX_OUTPUTS } else { count };
        Self(((1u16 << count) - 1) as u8)
    }

    pub const fn contains(&self, output: usize) -> bool {
        output < MAX_OUTPUTS && self.0 & (1 << output) != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Schaltet die Mitgliedschaft eines Ausgangs um.
    ///
    /// Gibt `Some(true)` zurück wenn der Ausgang jetzt ausgewählt ist,
    /// `Some(false)` wenn er abgewählt wurde, `None` für ungültige Indizes.
    pub fn toggle(&mut self, output: usize) -> Option<bool> {
        if output >= MAX_OUTPUTS {
            return None;
        }
        self.0 ^= 1 << output;
        Some(self.contains(output))
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_OUTPUTS).filter(|&output| self.contains(output))
    }
}

/// Verhalten der Taster, einmal pro Deployment festgelegt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonPolicy {
    /// Taster n schaltet Ausgang n in der Auswahl um (Mehrfach-Auswahl)
    Toggle,
    /// Taster n löst einmalig Modus n+1 aus (ein einzelner Ausgang)
    Momentary,
}

/// Flanke eines entprellten Tasters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// Akzeptierte Flanke eines Tasters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: usize,
    pub edge: Edge,
}

/// Aktion, die eine steigende Flanke gemäß `ButtonPolicy` auslöst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    ToggleOutput(usize),
    TriggerMode(u8),
}

/// Standard-Ansicht der Statusanzeige
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overview {
    /// Anzahl vorhandener Ausgänge (Indikatoren 1..=outputs)
    pub outputs: u8,
    pub selection: OutputSelection,
    pub knobs: KnobReadings,
}

impl Overview {
    pub fn brightness_percent(&self) -> u8 {
        brightness_percent(self.knobs.brightness)
    }

    /// Gefüllte Höhe eines Balkens mit `height` Pixeln
    pub fn bar_fill(&self, height: u32) -> u32 {
        bar_fill(self.brightness_percent(), height)
    }

    /// Kanalzeile mit fester Breite, z.B. `"R:  7"`
    pub fn channel_line(&self, channel: Channel) -> String<8> {
        let mut line = String::new();
        // 2 + 1 + 3 Zeichen passen immer in 8 Bytes
        let _ = write!(line, "{}:{:>3}", channel.label(), self.knobs.get(channel));
        line
    }

    /// Helligkeit als `" 42%"`
    pub fn brightness_line(&self) -> String<8> {
        let mut line = String::new();
        let _ = write!(line, "{:>3}%", self.brightness_percent());
        line
    }
}

/// Projektion für die Statusanzeige - nie autoritativ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusView {
    Overview(Overview),
    /// Transiente Großschrift-Anzeige `MODE n`
    Mode(u8),
}

impl StatusView {
    pub fn mode_text(number: u8) -> String<8> {
        let mut text = String::new();
        let _ = write!(text, "MODE {}", number);
        text
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for KnobReadings {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Knobs {{ r: {}, g: {}, b: {}, w: {}, br: {} }}",
            self.red,
            self.green,
            self.blue,
            self.white,
            self.brightness
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ColorVector {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "rgbw({}, {}, {}, {})",
            self.rgb.r,
            self.rgb.g,
            self.rgb.b,
            self.white
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for OutputSelection {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "OutputSelection({=u8:b})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusView {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            StatusView::Overview(overview) => defmt::write!(
                fmt,
                "Overview {{ {}, {} }}",
                overview.selection,
                overview.knobs
            ),
            StatusView::Mode(number) => defmt::write!(fmt, "Mode {}", number),
        }
    }
}
