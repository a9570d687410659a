//! Lichtpult Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits für die Peripherie und die komplette
//! Signalverarbeitung + Steuerschleife als Pure Logic.

#![no_std]

pub mod buttons;
pub mod change;
pub mod conditioner;
pub mod config;
pub mod console;
pub mod logic;
pub mod router;
pub mod status;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use buttons::{ButtonBank, Debouncer};
pub use change::{ChangeDetector, should_actuate};
pub use conditioner::{SignalConditioner, SmoothingFilter};
pub use config::{ConsoleConfig, SmoothingWeights};
pub use console::{Console, Hardware, TickReport};
pub use logic::{median3, to_8bit_inverted};
pub use router::{OutputRouter, Pulse};
pub use status::StatusScheduler;
pub use traits::{AnalogInput, ButtonInput, DisplayError, LedError, LightOutput, MonotonicClock, StatusDisplay};
pub use types::{
    ButtonAction, ButtonEvent, ButtonPolicy, Channel, ColorVector, Edge, KnobReadings, MAX_BUTTONS, MAX_OUTPUTS,
    OutputSelection, Overview, StatusView,
};
