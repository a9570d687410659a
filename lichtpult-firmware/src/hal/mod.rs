// Hardware Abstraction Layer (HAL) Module
//
// ESP32 Treiber hinter den Traits aus lichtpult-core.
// Die Taster brauchen keinen eigenen Treiber: ein Array aus
// `esp_hal::gpio::Input` ist bereits eine `ButtonInput`.

pub mod knobs;
pub mod led_strips;
pub mod status_panels;
pub mod timer;

pub use knobs::{AdcKnobs, KnobPins};
pub use led_strips::{RmtLedStrips, StripBuffers, empty_strip_buffers};
pub use status_panels::OledStatusPanels;
pub use timer::SystemTimer;
