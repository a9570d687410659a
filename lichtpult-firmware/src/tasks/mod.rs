// Task-Modul: Enthält alle Embassy Tasks
//
// Die Firmware hat genau einen Task: die Steuerschleife des Pults.

pub mod console;

// Re-export Tasks für einfachen Import
pub use console::{FirmwareHardware, console_task};
