// Library-Root: Treiber, Konfiguration und Tasks der Pult-Firmware
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von lichtpult-core
pub use lichtpult_core::{Console, ConsoleConfig, Hardware, LedError, LightOutput, StatusDisplay};

// ============================================================================
// Testing-Strategie
// ============================================================================
//
// Dieses Crate kompiliert nur für das ESP32 Target (xtensa-esp32-none-elf).
// Die gesamte Logik (Glättung, Entprellung, Change Detection, Modus-Anzeige)
// liegt deshalb in `lichtpult-core` und wird in `lichtpult-tests` gegen
// Mocks getestet. Hier bleiben nur dünne Treiber, die die Core-Traits
// implementieren.
