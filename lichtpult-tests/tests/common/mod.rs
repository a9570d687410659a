//! Mock-Peripherie für Host-Tests
//!
//! Jeder Mock zeichnet auf, was die Steuerschleife mit ihm gemacht hat.
#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use lichtpult_core::{
    AnalogInput, ButtonInput, Channel, ColorVector, Console, ConsoleConfig, DisplayError, Hardware, LedError,
    LightOutput, MAX_BUTTONS, MAX_OUTPUTS, MonotonicClock, StatusDisplay, StatusView, TickReport,
};

// ============================================================================
// Mock Potentiometer
// ============================================================================

/// Liefert pro Kanal einen festen Rohwert; optional vorher eine Skript-Folge
#[derive(Default)]
pub struct MockKnobs {
    pub raw: [u16; 5],
    pub script: [VecDeque<u16>; 5],
    pub read_count: usize,
}

impl MockKnobs {
    pub fn new(raw: [u16; 5]) -> Self {
        Self {
            raw,
            ..Self::default()
        }
    }

    pub fn set(&mut self, channel: Channel, raw: u16) {
        self.raw[channel.index()] = raw;
    }

    /// Die nächsten Messungen dieses Kanals kommen aus `samples`
    pub fn script(&mut self, channel: Channel, samples: &[u16]) {
        self.script[channel.index()].extend(samples.iter().copied());
    }
}

impl AnalogInput for MockKnobs {
    fn read(&mut self, channel: Channel) -> u16 {
        self.read_count += 1;
        self.script[channel.index()]
            .pop_front()
            .unwrap_or(self.raw[channel.index()])
    }
}

// ============================================================================
// Mock Taster
// ============================================================================

#[derive(Default)]
pub struct MockButtons {
    pub levels: [bool; MAX_BUTTONS],
}

impl MockButtons {
    pub fn press(&mut self, button: usize) {
        self.levels[button] = true;
    }

    pub fn release(&mut self, button: usize) {
        self.levels[button] = false;
    }
}

impl ButtonInput for MockButtons {
    fn is_pressed(&mut self, button: usize) -> bool {
        self.levels[button]
    }
}

// ============================================================================
// Mock LED Strips
// ============================================================================

pub struct MockStrips {
    pub pixels: Vec<Vec<ColorVector>>,
    /// (Ausgang, Farbe von Pixel 0) pro erfolgreichem flush
    pub flushes: Vec<(usize, ColorVector)>,
    pub fail_next_flush: bool,
}

impl MockStrips {
    pub fn new(pixels_per_output: usize) -> Self {
        Self {
            pixels: vec![vec![ColorVector::BLACK; pixels_per_output]; MAX_OUTPUTS],
            flushes: Vec::new(),
            fail_next_flush: false,
        }
    }

    pub fn flushes_for(&self, output: usize) -> Vec<ColorVector> {
        self.flushes
            .iter()
            .filter(|(o, _)| *o == output)
            .map(|(_, color)| *color)
            .collect()
    }

    /// Zuletzt gesendete Farbe eines Ausgangs
    pub fn shown(&self, output: usize) -> Option<ColorVector> {
        self.flushes_for(output).last().copied()
    }
}

impl LightOutput for MockStrips {
    fn set_pixel(&mut self, output: usize, index: usize, color: ColorVector) {
        self.pixels[output][index] = color;
    }

    fn flush(&mut self, output: usize) -> Result<(), LedError> {
        if self.fail_next_flush {
            self.fail_next_flush = false;
            return Err(LedError::WriteFailed);
        }

        let first = self.pixels[output][0];
        assert!(
            self.pixels[output].iter().all(|&pixel| pixel == first),
            "output {} not filled uniformly",
            output
        );
        self.flushes.push((output, first));
        Ok(())
    }
}

// ============================================================================
// Mock Statusanzeige
// ============================================================================

#[derive(Default)]
pub struct MockDisplay {
    pub views: Vec<StatusView>,
    pub fail: bool,
}

impl MockDisplay {
    pub fn last(&self) -> Option<&StatusView> {
        self.views.last()
    }
}

impl StatusDisplay for MockDisplay {
    fn render(&mut self, view: &StatusView) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::RenderFailed);
        }
        self.views.push(*view);
        Ok(())
    }
}

// ============================================================================
// Mock Zeitgeber (Uhr + blockierende Pause)
// ============================================================================

/// Die Pause schiebt die Uhr weiter, wie auf echter Hardware
#[derive(Default)]
pub struct MockTimer {
    pub now_ns: u64,
    pub delays_ms: Vec<u32>,
}

impl MockTimer {
    pub fn starting_at(ms: u64) -> Self {
        Self {
            now_ns: ms * 1_000_000,
            delays_ms: Vec::new(),
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ns += ms * 1_000_000;
    }
}

impl MonotonicClock for MockTimer {
    fn now_ms(&self) -> u64 {
        self.now_ns / 1_000_000
    }
}

impl DelayNs for MockTimer {
    fn delay_ns(&mut self, ns: u32) {
        self.now_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
        self.now_ns += u64::from(ms) * 1_000_000;
    }
}

// ============================================================================
// Testaufbau
// ============================================================================

pub type MockHardware = Hardware<MockKnobs, MockButtons, MockStrips, MockDisplay, MockTimer>;

/// Rohwerte für (R, G, B, W, Helligkeit)
pub fn mock_hardware(config: &ConsoleConfig, raw: [u16; 5]) -> MockHardware {
    Hardware {
        knobs: MockKnobs::new(raw),
        buttons: MockButtons::default(),
        light: MockStrips::new(usize::from(config.pixels_per_output)),
        display: MockDisplay::default(),
        // Nach dem Boot, damit die Entprell-Zeit ab 0 nicht greift
        timer: MockTimer::starting_at(1_000),
    }
}

/// Ein Tick plus die Pause, die der Firmware-Task danach macht
pub fn step(console: &mut Console, hw: &mut MockHardware) -> TickReport {
    let report = console.tick(hw);
    hw.timer.advance(u64::from(console.config().tick_ms));
    report
}

pub fn run(console: &mut Console, hw: &mut MockHardware, ticks: usize) -> Vec<TickReport> {
    (0..ticks).map(|_| step(console, hw)).collect()
}
